//! Closed keyword sets parsed from free-form request strings.
//!
//! Request files carry enumerated options as raw strings so the compiler can
//! decide per field whether an unknown value is fatal or degrades to a
//! default. `keyword_enum!` generates the closed set plus its parser.

/// Declare a `Copy` enum whose variants map one-to-one onto keywords.
///
/// Parsing trims and ignores ASCII case; [`Display`](std::fmt::Display)
/// writes the canonical keyword back out.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $kw:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant
            ),+
        }

        impl $name {
            /// Every accepted keyword, in declaration order.
            pub const KEYWORDS: &'static [&'static str] = &[$($kw),+];

            /// Parse a keyword (surrounding whitespace and ASCII case are
            /// ignored).
            #[must_use]
            pub fn parse(raw: &str) -> Option<Self> {
                let raw = raw.trim();
                $(
                    if raw.eq_ignore_ascii_case($kw) {
                        return Some(Self::$variant);
                    }
                )+
                None
            }

            /// Canonical keyword for this value.
            #[must_use]
            pub const fn keyword(self) -> &'static str {
                match self {
                    $(Self::$variant => $kw),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(
                &self,
                f: &mut ::std::fmt::Formatter<'_>,
            ) -> ::std::fmt::Result {
                f.write_str(self.keyword())
            }
        }
    };
}

pub(crate) use keyword_enum;

#[cfg(test)]
mod tests {
    keyword_enum! {
        enum Shade {
            Light => "light",
            DarkGrey => "dark_grey",
        }
    }

    #[test]
    fn parse_ignores_case_and_padding() {
        assert_eq!(Shade::parse("  LIGHT "), Some(Shade::Light));
        assert_eq!(Shade::parse("dark_grey"), Some(Shade::DarkGrey));
        assert_eq!(Shade::parse("dark grey"), None);
    }

    #[test]
    fn display_writes_canonical_keyword() {
        assert_eq!(Shade::DarkGrey.to_string(), "dark_grey");
        assert_eq!(Shade::KEYWORDS, &["light", "dark_grey"]);
    }
}
