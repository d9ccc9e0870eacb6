/*
 * Copyright (c) Radzivon Bartoshyk, 11/2024. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
//! Prints the fixed-point tables of `src/built_coefficients.rs`.
//!
//! Published decimal coefficients are parsed exactly, scaled by `1 << PRECISION`
//! and rounded to nearest with arbitrary precision floats.
use rug::float::Round;
use rug::Float;
use std::error::Error;

const BITS: u32 = 150;
const PRECISION: u32 = 6;

struct StandardTables {
    name: &'static str,
    bias_y: u8,
    /// Rows Y, Cb, Cr, columns R, G, B
    forward: [[&'static str; 3]; 3],
    /// Y gain, Cr to R, Cb to G, Cr to G, Cb to B
    inverse: [&'static str; 5],
}

const TABLES: [StandardTables; 3] = [
    StandardTables {
        name: "JPEG_FULL",
        bias_y: 0,
        forward: [
            ["0.299", "0.587", "0.114"],
            ["-0.1687", "-0.3313", "0.5"],
            ["0.5", "-0.4187", "-0.0813"],
        ],
        inverse: ["1.0", "1.402", "-0.3441", "-0.7141", "1.772"],
    },
    StandardTables {
        name: "BT601_LIMITED",
        bias_y: 16,
        forward: [
            ["0.2568", "0.5041", "0.0979"],
            ["-0.1482", "-0.291", "0.4392"],
            ["0.4392", "-0.3678", "-0.0714"],
        ],
        inverse: ["1.1644", "1.596", "-0.3918", "-0.813", "2.0172"],
    },
    StandardTables {
        name: "BT709_LIMITED",
        bias_y: 16,
        forward: [
            ["0.1826", "0.6142", "0.062"],
            ["-0.1006", "-0.3386", "0.4392"],
            ["0.4392", "-0.3989", "-0.0403"],
        ],
        inverse: ["1.1644", "1.7927", "-0.2132", "-0.5329", "2.1124"],
    },
];

fn to_fixed(value: &str) -> Result<i16, Box<dyn Error>> {
    let parsed = Float::with_val(BITS, Float::parse(value)?);
    let scaled = parsed * Float::with_val(BITS, 1u32 << PRECISION);
    let rounded = scaled
        .to_i32_saturating_round(Round::Nearest)
        .ok_or_else(|| format!("{value} is not a finite number"))?;
    Ok(i16::try_from(rounded)?)
}

fn print_forward(table: &StandardTables) -> Result<(), Box<dyn Error>> {
    let names = [
        ["yr", "yg", "yb"],
        ["cb_r", "cb_g", "cb_b"],
        ["cr_r", "cr_g", "cr_b"],
    ];
    println!(
        "static FORWARD_{}_8_{}PREC: ForwardCoefficients = ForwardCoefficients {{",
        table.name, PRECISION
    );
    println!("    bias_y: {},", table.bias_y);
    println!("    matrix: CbCrForwardTransform {{");
    for (row, row_names) in table.forward.iter().zip(names.iter()) {
        for (value, name) in row.iter().zip(row_names.iter()) {
            println!("        {}: {},", name, to_fixed(value)?);
        }
    }
    println!("    }},");
    println!("}};");
    Ok(())
}

fn print_inverse(table: &StandardTables) -> Result<(), Box<dyn Error>> {
    let names = ["y_coef", "cr_coef", "g_coef_cb", "g_coef_cr", "cb_coef"];
    println!(
        "static INVERSE_{}_8_{}PREC: InverseCoefficients = InverseCoefficients {{",
        table.name, PRECISION
    );
    println!("    bias_y: {},", table.bias_y);
    println!("    transform: CbCrInverseTransform {{");
    for (value, name) in table.inverse.iter().zip(names.iter()) {
        println!("        {}: {},", name, to_fixed(value)?);
    }
    println!("    }},");
    println!("}};");
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    for table in TABLES.iter() {
        print_forward(table)?;
        println!();
    }
    for table in TABLES.iter() {
        print_inverse(table)?;
        println!();
    }
    Ok(())
}
