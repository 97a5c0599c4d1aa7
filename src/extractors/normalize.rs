// src/extractors/normalize.rs
//! Pure string transforms applied to raw property values.

use std::borrow::Cow;
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Separator used when several values are merged into one field.
pub const JOIN_SEPARATOR: &str = " / ";

// --- Regex Patterns (Lazy Static) ---
static THICKNESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*mm\b").expect("Failed to compile THICKNESS_RE")
});

// Boilerplate markers at the start of handle/slide descriptors, longest first
static DESCRIPTOR_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:with\s+slide\s+|without\s+|with\s+)").expect("Failed to compile DESCRIPTOR_PREFIX_RE")
});

// "Drawer with slide X", "Slide X": the model name is whatever follows
static SLIDE_MODEL_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:drawer\s+)?(?:with\s+)?(?:slide\s+)?").expect("Failed to compile SLIDE_MODEL_PREFIX_RE")
});

static HINGE_CLAUSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.*?)\s*\b(without|with)\b.*$").expect("Failed to compile HINGE_CLAUSE_RE")
});

/// Drops repeated values, keeping the first occurrence of each.
pub fn dedup_preserving_order<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

/// Deduplicates and joins accumulated values; `None` when nothing accumulated.
pub fn join_values<I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let unique = dedup_preserving_order(values);
    if unique.is_empty() {
        None
    } else {
        Some(unique.join(JOIN_SEPARATOR))
    }
}

/// Splits `Material\Color` tokens into (materials, colors).
/// A token without the separator only names a color.
pub fn split_material_color<S: AsRef<str>>(tokens: &[S]) -> (Vec<String>, Vec<String>) {
    let mut materials = Vec::new();
    let mut colors = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        match token.split_once('\\') {
            Some((material, color)) => {
                push_trimmed(&mut materials, material);
                push_trimmed(&mut colors, color);
            }
            None => push_trimmed(&mut colors, token),
        }
    }

    (materials, colors)
}

fn push_trimmed(target: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        target.push(value.to_string());
    }
}

/// Pulls the first `<digits>mm` measure out of free text.
pub fn thickness(text: &str) -> Option<String> {
    THICKNESS_RE
        .captures(text)
        .map(|caps| format!("{}mm", &caps[1]))
}

/// Removes leading with/without markers and collapses `X > X` into `X`.
pub fn strip_redundancy(text: &str) -> Option<String> {
    let stripped = DESCRIPTOR_PREFIX_RE.replace(text, "");
    collapse_segments(&stripped)
}

/// Joins `>` sub-category segments again after dropping blanks and
/// consecutive repeats.
pub fn collapse_segments(text: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in text.split('>').map(str::trim).filter(|s| !s.is_empty()) {
        if segments.last().map_or(true, |last| !last.eq_ignore_ascii_case(segment)) {
            segments.push(segment);
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join(" > "))
    }
}

/// Decodes HTML entities that survive XML parsing in double-encoded vendor text.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let decoded = tail
            .find(';')
            .filter(|end| *end <= 10)
            .and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "gt" => Some('>'),
        "lt" => Some('<'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = name.strip_prefix('#')?;
            let hex = code.strip_prefix('x').or_else(|| code.strip_prefix('X'));
            let value = match hex {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}

/// Damping vocabulary for slides and hinges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damping {
    SoftClose,
    Standard,
    PushOpen,
}

impl Damping {
    pub fn label(&self) -> &'static str {
        match self {
            Damping::SoftClose => "Soft Close",
            Damping::Standard => "Standard",
            Damping::PushOpen => "Push Open",
        }
    }

    /// Maps a vendor damping description onto the vocabulary.
    pub fn from_description(text: &str) -> Option<Self> {
        let lower = text.trim().to_lowercase();
        if lower.starts_with("without") {
            Some(Damping::Standard)
        } else if lower.contains("push") {
            Some(Damping::PushOpen)
        } else if lower.starts_with("with") || lower.contains("soft close") || lower.contains("soft-close") {
            Some(Damping::SoftClose)
        } else {
            None
        }
    }
}

/// `"Clip Top with damper"` becomes `"Clip Top (Soft Close)"`.
pub fn canonical_hinge(label: &str) -> Option<String> {
    let label = collapse_segments(label)?;

    let Some(caps) = HINGE_CLAUSE_RE.captures(&label) else {
        return Some(label);
    };
    let damping = if caps[2].eq_ignore_ascii_case("without") {
        Damping::Standard
    } else {
        Damping::SoftClose
    };

    let base = caps[1].trim();
    if base.is_empty() {
        Some(damping.label().to_string())
    } else {
        Some(format!("{} ({})", base, damping.label()))
    }
}

/// Drawer model without redundant phrasing; of a `/` path only the last
/// segment is kept.
pub fn slide_model(text: &str) -> Option<String> {
    let stripped = SLIDE_MODEL_PREFIX_RE.replace(text, "");
    let collapsed = collapse_segments(&stripped)?;
    collapsed
        .rsplit('/')
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// `"brand model type"` from whichever parts resolved.
pub fn assemble_slide(brand: Option<&str>, model: Option<&str>, damping: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [brand, model, damping]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Largest cent count an `f64` still holds exactly (2^53).
const MAX_EXACT_CENTS: f64 = 9_007_199_254_740_992.0;

/// Renders an amount as `R$ 1.234,50` regardless of host locale.
/// Amounts that are not finite or too large to keep cent precision are refused.
pub fn format_brl(amount: f64) -> Option<String> {
    let scaled = (amount.abs() * 100.0).round();
    if !scaled.is_finite() || scaled > MAX_EXACT_CENTS {
        return None;
    }
    let cents = scaled as u64;
    let units = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    Some(format!("{}R$ {},{:02}", sign, grouped, fraction))
}

/// Parses vendor and Brazilian-formatted amounts: `1234.5`, `1234,5`,
/// `1.234,50`, `1,234.50`, `R$ 1.234,50`.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let body: String = unsigned
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if body.is_empty() || !body.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }

    let commas = body.matches(',').count();
    let dots = body.matches('.').count();
    let normalized = match (body.rfind(','), body.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => body.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => body.replace(',', ""),
        (Some(_), None) if commas > 1 => body.replace(',', ""),
        (Some(_), None) => body.replace(',', "."),
        (None, Some(_)) if dots > 1 => body.replace('.', ""),
        _ => body,
    };

    let value = normalized.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dedup_keeps_first_seen_order() {
        let joined = join_values(strings(&["A", "B", "A", "C"]));
        assert_eq!(joined.as_deref(), Some("A / B / C"));
        assert_eq!(join_values(Vec::new()), None);
    }

    #[test]
    fn material_color_split() {
        let (materials, colors) = split_material_color(&["MDF\\White"]);
        assert_eq!(materials, strings(&["MDF"]));
        assert_eq!(colors, strings(&["White"]));

        let (materials, colors) = split_material_color(&["White"]);
        assert!(materials.is_empty());
        assert_eq!(colors, strings(&["White"]));
    }

    #[test]
    fn material_color_split_trims_and_uses_first_backslash() {
        let (materials, colors) = split_material_color(&[" MDP \\ Grafite\\Matte ", "\\Branco"]);
        assert_eq!(materials, strings(&["MDP"]));
        assert_eq!(colors, strings(&["Grafite\\Matte", "Branco"]));
    }

    #[test]
    fn thickness_from_free_text() {
        assert_eq!(thickness("Glass 4mm tempered").as_deref(), Some("4mm"));
        assert_eq!(thickness("Panel MDF 18 MM").as_deref(), Some("18mm"));
        assert_eq!(thickness("15,5mm").as_deref(), Some("15,5mm"));
        assert_eq!(thickness("15"), None);
        assert_eq!(thickness("Thin glass"), None);
    }

    #[test]
    fn redundancy_stripper() {
        assert_eq!(strip_redundancy("with slide Tandembox").as_deref(), Some("Tandembox"));
        assert_eq!(strip_redundancy("With Bar Handle 160mm").as_deref(), Some("Bar Handle 160mm"));
        assert_eq!(strip_redundancy("Bar > Bar").as_deref(), Some("Bar"));
        assert_eq!(strip_redundancy("Handles > Bar > bar").as_deref(), Some("Handles > Bar"));
        assert_eq!(strip_redundancy("with "), None);
    }

    #[test]
    fn entities_decoded() {
        assert_eq!(decode_entities("Aluminium &gt; Slim"), "Aluminium > Slim");
        assert_eq!(decode_entities("A &amp; B &#62; C &#x3E; D"), "A & B > C > D");
        assert_eq!(decode_entities("R&D &unknown; end &"), "R&D &unknown; end &");
        assert!(matches!(decode_entities("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn hinge_labels_canonicalized() {
        assert_eq!(canonical_hinge("Clip Top with damper").as_deref(), Some("Clip Top (Soft Close)"));
        assert_eq!(canonical_hinge("Clip Top without damper").as_deref(), Some("Clip Top (Standard)"));
        assert_eq!(canonical_hinge("Without damper").as_deref(), Some("Standard"));
        assert_eq!(canonical_hinge("Clip Top 110").as_deref(), Some("Clip Top 110"));
        assert_eq!(canonical_hinge("  "), None);
    }

    #[test]
    fn damping_vocabulary() {
        assert_eq!(Damping::from_description("With damping"), Some(Damping::SoftClose));
        assert_eq!(Damping::from_description("without damping"), Some(Damping::Standard));
        assert_eq!(Damping::from_description("Push to open"), Some(Damping::PushOpen));
        assert_eq!(Damping::from_description("Telescopic"), None);
    }

    #[test]
    fn slide_model_keeps_last_path_segment() {
        assert_eq!(slide_model("Drawer with slide Tandembox/Antaro").as_deref(), Some("Antaro"));
        assert_eq!(slide_model("Slide Quadro").as_deref(), Some("Quadro"));
        assert_eq!(slide_model("Movento"), Some("Movento".to_string()));
        assert_eq!(slide_model("Drawer "), None);
    }

    #[test]
    fn slide_assembled_from_resolved_parts() {
        assert_eq!(
            assemble_slide(Some("Blum"), Some("Antaro"), Some("Soft Close")).as_deref(),
            Some("Blum Antaro Soft Close")
        );
        assert_eq!(assemble_slide(None, Some("Antaro"), None).as_deref(), Some("Antaro"));
        assert_eq!(assemble_slide(None, None, None), None);
    }

    #[test]
    fn currency_format() {
        assert_eq!(format_brl(1234.5).as_deref(), Some("R$ 1.234,50"));
        assert_eq!(format_brl(0.0).as_deref(), Some("R$ 0,00"));
        assert_eq!(format_brl(999.999).as_deref(), Some("R$ 1.000,00"));
        assert_eq!(format_brl(1234567.891).as_deref(), Some("R$ 1.234.567,89"));
        assert_eq!(format_brl(-12.3).as_deref(), Some("-R$ 12,30"));
    }

    #[test]
    fn currency_format_refuses_amounts_without_cent_precision() {
        assert_eq!(format_brl(f64::INFINITY), None);
        assert_eq!(format_brl(f64::NAN), None);
        assert_eq!(format_brl(1e300), None);
        assert_eq!(format_brl(-1e300), None);
        assert_eq!(format_brl(1e13).as_deref(), Some("R$ 10.000.000.000.000,00"));
    }

    #[test]
    fn decimal_parsing() {
        assert_eq!(parse_decimal("1234.5"), Some(1234.5));
        assert_eq!(parse_decimal("1234,5"), Some(1234.5));
        assert_eq!(parse_decimal("1.234,50"), Some(1234.5));
        assert_eq!(parse_decimal("1,234.50"), Some(1234.5));
        assert_eq!(parse_decimal("R$ 1.234,50"), Some(1234.5));
        assert_eq!(parse_decimal("-R$ 12,30"), Some(-12.3));
        assert_eq!(parse_decimal("1.234.567"), Some(1234567.0));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn formatted_amount_parses_back() {
        assert_eq!(parse_decimal(&format_brl(98765.43).unwrap()), Some(98765.43));
    }
}
