//! Built-in list definitions installed into new documents
//!
//! Ten abstract definitions (ids 0..=9) and ten instances. Instances 1..=10
//! point at abstract ids 3, 9, 2, 1, 4, 0, 6, 8, 5, 7, so a document can use
//! `numId` 1 for a legal outline, 2 for small bullets and so on without
//! creating its own instances.

use super::{AbstractNum, Level, LevelFonts, Num, NumberFormat, Numbering};

/// Abstract id referenced by each default instance, in numId order
pub const DEFAULT_INSTANCES: [u32; 10] = [3, 9, 2, 1, 4, 0, 6, 8, 5, 7];

const TIMES: &str = "Times New Roman";
const COURIER: &str = "Courier New";

/// Build the default numbering part
pub fn default_numbering() -> Numbering {
    let mut numbering = Numbering::new();

    let abstracts = [
        symbol_bullets(0),
        outline(1),
        outline(2),
        legal_outline(3),
        dash_bullets(4),
        indented_bullets(5, 720, true),
        indented_bullets(6, 720, false),
        open_bullets(7),
        wide_bullets(8),
        small_bullets(9),
    ];
    numbering.abstract_nums.extend(abstracts);

    for (i, abstract_id) in DEFAULT_INSTANCES.iter().enumerate() {
        numbering.nums.push(Num::new(i as u32 + 1, *abstract_id));
    }

    numbering
}

/// Font used for a bullet symbol
fn symbol_font(symbol: &str) -> &'static str {
    match symbol {
        "o" => COURIER,
        "§" => "Wingdings",
        _ => "Symbol",
    }
}

fn bullet(ilvl: u8, symbol: &str) -> Level {
    Level::new(ilvl)
        .with_format(NumberFormat::Bullet)
        .with_text(symbol)
        .with_justification("left")
        .with_fonts(LevelFonts::symbol(symbol_font(symbol)))
}

/// `·`, `o`, `§` repeating
fn cycle(ilvl: u8) -> &'static str {
    ["·", "o", "§"][ilvl as usize % 3]
}

fn step(base: i32, ilvl: u8) -> i32 {
    base + 720 * ilvl as i32
}

fn symbol_bullets(id: u32) -> AbstractNum {
    AbstractNum::with_levels(
        id,
        (0..9).map(|l| {
            let pos = step(1080, l);
            bullet(l, cycle(l)).with_tab(pos as u32).with_indent(pos, 360)
        }),
    )
}

fn outline(id: u32) -> AbstractNum {
    let levels = (0..9u8).map(|l| {
        let pos = step(720, l);
        let (fmt, text) = match l % 3 {
            0 => (NumberFormat::Decimal, format!("%{}.", l + 1)),
            1 => (NumberFormat::LowerLetter, format!("%{}.", l + 1)),
            _ => (NumberFormat::LowerRoman, format!("%{}.", l + 1)),
        };
        let level = Level::new(l).with_format(fmt).with_text(text);
        match l {
            0 => level
                .with_text("%1)")
                .with_justification("left")
                .with_tab(1080)
                .with_indent(1080, 720)
                .with_fonts(LevelFonts::complex_script(TIMES)),
            _ if l % 3 == 2 => level
                .with_justification("right")
                .with_tab(pos as u32)
                .with_indent(pos, 180),
            _ => level
                .with_justification("left")
                .with_tab(pos as u32)
                .with_indent(pos, 360),
        }
    });
    AbstractNum::with_levels(id, levels)
}

fn legal_outline(id: u32) -> AbstractNum {
    let levels = (0..9u8).map(|l| {
        let text = (1..=l + 1)
            .map(|n| format!("%{}", n))
            .collect::<Vec<_>>()
            .join(".");
        Level::new(l)
            .with_format(NumberFormat::Decimal)
            .with_text(text)
            .with_justification("left")
            .with_tab(720 * (l as u32 + 1))
            .with_indent(400, 360)
            .with_fonts(LevelFonts::complex_script(TIMES))
    });
    AbstractNum::with_levels(id, levels)
}

fn dash_bullets(id: u32) -> AbstractNum {
    let levels = (0..9u8).map(|l| {
        let level = if l == 0 {
            Level::new(0)
                .with_format(NumberFormat::Bullet)
                .with_text("-")
                .with_justification("left")
                .with_fonts(LevelFonts::symbol("Calibri").with_east_asia(TIMES))
        } else {
            bullet(l, ["o", "§", "·"][(l as usize - 1) % 3])
        };
        level.with_indent(step(1080, l), 360)
    });
    AbstractNum::with_levels(id, levels)
}

fn indented_bullets(id: u32, base: i32, courier_cs: bool) -> AbstractNum {
    let levels = (0..9u8).map(|l| {
        let symbol = cycle(l);
        let mut level = bullet(l, symbol).with_indent(step(base, l), 360);
        if courier_cs && symbol == "o" {
            level = level.with_fonts(LevelFonts::symbol(COURIER).with_cs(COURIER));
        }
        level
    });
    AbstractNum::with_levels(id, levels)
}

fn open_bullets(id: u32) -> AbstractNum {
    const SYMBOLS: [&str; 9] = ["o", "o", "§", "·", "o", "§", "·", "o", "§"];
    let levels = SYMBOLS.iter().enumerate().map(|(l, symbol)| {
        let l = l as u8;
        let mut level = bullet(l, symbol).with_indent(step(360, l), 360);
        if *symbol == "o" {
            level = level.with_fonts(LevelFonts::symbol(COURIER).with_cs(COURIER));
        }
        level
    });
    AbstractNum::with_levels(id, levels)
}

fn wide_bullets(id: u32) -> AbstractNum {
    let levels = (0..9u8).map(|l| {
        let symbol = cycle(l);
        let start = if l == 0 { 630 } else { step(720, l) };
        let mut level = bullet(l, symbol).with_indent(start, 360);
        if symbol == "o" {
            level = level.with_fonts(LevelFonts::symbol(COURIER).with_cs(COURIER));
        }
        level
    });
    AbstractNum::with_levels(id, levels)
}

fn small_bullets(id: u32) -> AbstractNum {
    let levels = (0..9u8).map(|l| {
        let pos = step(720, l);
        bullet(l, "·")
            .with_tab(pos as u32)
            .with_indent(pos, 360)
            .with_size(20)
    });
    AbstractNum::with_levels(id, levels)
}
