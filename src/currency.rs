// ============================================================================
// Formatage monétaire : Real brésilien (pt-BR / BRL)
// ============================================================================
// Reproduit le rendu de Intl.NumberFormat('pt-BR', { style: 'currency',
// currency: 'BRL' }) utilisé par la page web :
//   1234.5    -> "R$ 1.234,50"   (espace insécable U+00A0 après le symbole)
//   -42.1     -> "-R$ 42,10"
//
// CONCEPTS RUST :
// 1. Formatage exact des flottants : format!("{:.N}") travaille sur la valeur
//    décimale exacte du f64, on n'a pas besoin de crate externe
// 2. Manipulation de String octet par octet (chiffres ASCII)
// ============================================================================

/// Symbole monétaire du Real
pub const CURRENCY_SYMBOL: &str = "R$";

/// Espace insécable placé entre le symbole et le montant
pub const NBSP: char = '\u{a0}';

/// Formate une valeur en Real brésilien
///
/// CONCEPT : Aucun cas d'erreur
/// - NaN -> "R$ NaN", infini -> "R$ ∞" (comme Intl)
/// - Le zéro négatif garde son signe ("-R$ 0,00"), comme Intl
/// - Arrondi "half-expand" : 0.125 -> "0,13"
///
/// # Exemple
/// ```
/// use lazybudget::currency::format_brl;
/// assert_eq!(format_brl(1234.5), "R$\u{a0}1.234,50");
/// ```
pub fn format_brl(value: f64) -> String {
    if value.is_nan() {
        return format!("{CURRENCY_SYMBOL}{NBSP}NaN");
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };

    if value.is_infinite() {
        return format!("{sign}{CURRENCY_SYMBOL}{NBSP}∞");
    }

    let fixed = fixed_half_up(value.abs(), 2);
    let (integer, decimals) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!(
        "{sign}{CURRENCY_SYMBOL}{NBSP}{},{}",
        group_thousands(integer),
        decimals
    )
}

/// Équivalent de Number.prototype.toFixed(digits)
///
/// Utilisé pour le pourcentage des tooltips du graphique des catégories.
/// Les valeurs non finies donnent "NaN", "Infinity" ou "-Infinity".
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // toFixed ne garde pas le signe du zéro négatif (x < 0 est faux)
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}", fixed_half_up(value.abs(), digits))
}

// ============================================================================
// Helpers internes
// ============================================================================

/// Nombre de chiffres de garde pour détecter une égalité exacte (x.xx5000…)
const GUARD_DIGITS: usize = 30;

/// Arrondit une valeur positive à `digits` décimales, égalités vers le haut
///
/// CONCEPT : format!("{:.N}") de Rust arrondit les égalités exactes au pair
/// (0.125 -> "0.12"), alors que le navigateur arrondit vers le haut ("0.13").
/// On détecte l'égalité sur l'écriture exacte et on corrige à la main.
fn fixed_half_up(value: f64, digits: usize) -> String {
    let wide = format!("{:.*}", digits + GUARD_DIGITS, value);
    let (kept, rest) = wide.split_at(wide.len() - GUARD_DIGITS);

    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{:.*}", digits, value);
    }

    increment_last_digit(kept.trim_end_matches('.'))
}

/// Ajoute une unité au dernier chiffre d'un nombre décimal écrit en ASCII
///
/// "0.2" -> "0.3", "9.99" -> "10.00", "12" -> "13"
fn increment_last_digit(text: &str) -> String {
    let mut bytes = text.as_bytes().to_vec();

    for byte in bytes.iter_mut().rev() {
        match *byte {
            b'.' => continue,
            b'9' => *byte = b'0',
            _ => {
                *byte += 1;
                return bytes.iter().map(|&b| b as char).collect();
            }
        }
    }

    // Retenue sur tous les chiffres : "99.9" -> "100.0"
    let mut out = String::with_capacity(bytes.len() + 1);
    out.push('1');
    out.extend(bytes.iter().map(|&b| b as char));
    out
}

/// Insère un point tous les trois chiffres en partant de la droite
///
/// CONCEPT RUST : Iterator sur chars().rev()
/// - On construit à l'envers puis on inverse le résultat
fn group_thousands(integer: &str) -> String {
    let mut reversed = String::with_capacity(integer.len() + integer.len() / 3);

    for (i, c) in integer.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            reversed.push('.');
        }
        reversed.push(c);
    }

    reversed.chars().rev().collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl_basic() {
        assert_eq!(format_brl(0.0), "R$\u{a0}0,00");
        assert_eq!(format_brl(5.0), "R$\u{a0}5,00");
        assert_eq!(format_brl(1234.5), "R$\u{a0}1.234,50");
        assert_eq!(format_brl(1_234_567.891), "R$\u{a0}1.234.567,89");
    }

    #[test]
    fn test_format_brl_thousands_boundaries() {
        assert_eq!(format_brl(999.0), "R$\u{a0}999,00");
        assert_eq!(format_brl(1000.0), "R$\u{a0}1.000,00");
        assert_eq!(format_brl(100_000.0), "R$\u{a0}100.000,00");
    }

    #[test]
    fn test_format_brl_negative() {
        assert_eq!(format_brl(-42.1), "-R$\u{a0}42,10");
        assert_eq!(format_brl(-1500.0), "-R$\u{a0}1.500,00");
        assert_eq!(format_brl(-0.0), "-R$\u{a0}0,00");
    }

    #[test]
    fn test_format_brl_rounding() {
        // 0.125 est exact en binaire : égalité arrondie vers le haut
        assert_eq!(format_brl(0.125), "R$\u{a0}0,13");
        // Retenue qui traverse la virgule et crée un nouveau groupe
        assert_eq!(format_brl(999.999), "R$\u{a0}1.000,00");
        assert_eq!(format_brl(10.004), "R$\u{a0}10,00");
    }

    #[test]
    fn test_format_brl_non_finite() {
        assert_eq!(format_brl(f64::NAN), "R$\u{a0}NaN");
        assert_eq!(format_brl(f64::INFINITY), "R$\u{a0}∞");
        assert_eq!(format_brl(f64::NEG_INFINITY), "-R$\u{a0}∞");
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(25.0, 1), "25.0");
        assert_eq!(to_fixed(75.0, 1), "75.0");
        assert_eq!(to_fixed(33.333333, 1), "33.3");
        assert_eq!(to_fixed(0.25, 1), "0.3");
        assert_eq!(to_fixed(-1.25, 1), "-1.3");
        assert_eq!(to_fixed(-0.0, 1), "0.0");
        assert_eq!(to_fixed(2.5, 0), "3");
    }

    #[test]
    fn test_to_fixed_non_finite() {
        assert_eq!(to_fixed(f64::NAN, 1), "NaN");
        assert_eq!(to_fixed(f64::INFINITY, 1), "Infinity");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 1), "-Infinity");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1.234");
        assert_eq!(group_thousands("1234567"), "1.234.567");
    }

    #[test]
    fn test_increment_last_digit() {
        assert_eq!(increment_last_digit("0.2"), "0.3");
        assert_eq!(increment_last_digit("9.99"), "10.00");
        assert_eq!(increment_last_digit("12"), "13");
    }
}
