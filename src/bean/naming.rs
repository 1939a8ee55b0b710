//! Key naming strategies applied when beans are flattened into maps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How property names are rewritten into map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    /// Keep names unchanged.
    #[default]
    Default,
    /// `user_name` -> `userName`
    Camel,
    /// `userName` -> `user_name`
    LowerUnderline,
    /// `userName` -> `USER_NAME`
    UpperUnderline,
    /// `userName` -> `user-name`
    LowerDashed,
    /// `userName` -> `USER-NAME`
    UpperDashed,
}

impl NamingStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            NamingStrategy::Default => "default",
            NamingStrategy::Camel => "camel",
            NamingStrategy::LowerUnderline => "lower_underline",
            NamingStrategy::UpperUnderline => "upper_underline",
            NamingStrategy::LowerDashed => "lower_dashed",
            NamingStrategy::UpperDashed => "upper_dashed",
        }
    }
}

impl fmt::Display for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "default" => Ok(NamingStrategy::Default),
            "camel" => Ok(NamingStrategy::Camel),
            "lower_underline" => Ok(NamingStrategy::LowerUnderline),
            "upper_underline" => Ok(NamingStrategy::UpperUnderline),
            "lower_dashed" => Ok(NamingStrategy::LowerDashed),
            "upper_dashed" => Ok(NamingStrategy::UpperDashed),
            other => Err(format!("unknown naming strategy '{}'", other)),
        }
    }
}

/// Rewrites `keyword` according to `strategy`. Blank input is returned as is.
pub fn format_keyword(keyword: &str, strategy: NamingStrategy) -> String {
    if keyword.trim().is_empty() {
        return keyword.to_string();
    }
    match strategy {
        NamingStrategy::Default => keyword.to_string(),
        NamingStrategy::Camel => to_camel_case(keyword),
        NamingStrategy::LowerUnderline => to_symbol_case(keyword, '_').to_lowercase(),
        NamingStrategy::UpperUnderline => to_symbol_case(keyword, '_').to_uppercase(),
        NamingStrategy::LowerDashed => to_symbol_case(keyword, '-').to_lowercase(),
        NamingStrategy::UpperDashed => to_symbol_case(keyword, '-').to_uppercase(),
    }
}

/// `user_name` / `user-name` -> `userName`. Names without separators are
/// left alone.
pub fn to_camel_case(name: &str) -> String {
    if !name.contains(['_', '-']) {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        match ch {
            '_' | '-' => upper_next = !out.is_empty(),
            _ if upper_next => {
                out.extend(ch.to_uppercase());
                upper_next = false;
            }
            _ => out.extend(ch.to_lowercase()),
        }
    }
    out
}

/// Splits camel case words with `symbol`: `userName` -> `user_Name`,
/// `HTTPServer` -> `HTTP_Server`. Existing `_` and `-` become `symbol`.
pub fn to_symbol_case(name: &str, symbol: char) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if ch == '_' || ch == '-' {
            if !out.ends_with(symbol) {
                out.push(symbol);
            }
            continue;
        }
        if ch.is_uppercase() && i > 0 && !out.ends_with(symbol) {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push(symbol);
            }
        }
        out.push(ch);
    }
    out
}
