macro_rules! number_formats {
    ($($variant:ident => $name:literal,)*) => {
        /// `w:numFmt`; values without a variant are kept as written
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum NumberFormat {
            $($variant,)*
            Other(String),
        }

        impl std::str::FromStr for NumberFormat {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Ok(match s {
                    $($name => NumberFormat::$variant,)*
                    other => NumberFormat::Other(other.to_string()),
                })
            }
        }

        impl NumberFormat {
            pub fn as_str(&self) -> &str {
                match self {
                    $(NumberFormat::$variant => $name,)*
                    NumberFormat::Other(name) => name,
                }
            }
        }
    };
}

number_formats! {
    Decimal => "decimal",
    DecimalZero => "decimalZero",
    UpperRoman => "upperRoman",
    LowerRoman => "lowerRoman",
    UpperLetter => "upperLetter",
    LowerLetter => "lowerLetter",
    Bullet => "bullet",
    None => "none",
}

/// Font slots of a level symbol (w:rFonts)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelFonts {
    pub hint: Option<String>,
    pub ascii: Option<String>,
    pub h_ansi: Option<String>,
    pub east_asia: Option<String>,
    pub cs: Option<String>,
}

impl LevelFonts {
    /// Same symbol font for ASCII and high ANSI text, with the default hint
    pub fn symbol(font: &str) -> Self {
        LevelFonts {
            hint: Some("default".into()),
            ascii: Some(font.into()),
            h_ansi: Some(font.into()),
            ..Default::default()
        }
    }

    /// Complex script font only
    pub fn complex_script(font: &str) -> Self {
        LevelFonts {
            cs: Some(font.into()),
            ..Default::default()
        }
    }

    pub fn with_cs(mut self, font: &str) -> Self {
        self.cs = Some(font.into());
        self
    }

    pub fn with_east_asia(mut self, font: &str) -> Self {
        self.east_asia = Some(font.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        for name in ["decimal", "decimalZero", "upperLetter", "lowerRoman", "bullet", "none"] {
            let fmt: NumberFormat = name.parse().unwrap();
            assert_eq!(fmt.as_str(), name);
        }
        let other: NumberFormat = "cardinalText".parse().unwrap();
        assert_eq!(other, NumberFormat::Other("cardinalText".into()));
    }
}
