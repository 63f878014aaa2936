//! Russian-locale string collation at base strength.
//!
//! Only primary differences count: case and diacritics are folded, `ё`
//! collates as `е`. Combining marks are ignorable unless they compose a
//! distinct Cyrillic letter such as `й`. Scripts are ordered whitespace,
//! punctuation, symbols, digits, Cyrillic, Latin, then everything else by
//! code point. Digits are compared one character at a time, so `"10"` sorts
//! before `"9"`.

use std::cmp::Ordering;

use smallvec::SmallVec;

const SPACE: u32 = 1;
const PUNCTUATION: u32 = 2;
const SYMBOL: u32 = 3;
const DIGIT: u32 = 4;
const CYRILLIC: u32 = 5;
const LATIN: u32 = 6;
const OTHER: u32 = 7;

const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^";
const SYMBOL_ORDER: &str = "+<=>|~$№§°";
const CYRILLIC_ORDER: &str = "абвгґдђѓеєжзѕиіїйјклљмнњопрстћќуўфхцчџшщъыьэюя";

type Weights = SmallVec<[u32; 2]>;

pub fn compare_ru(a: &str, b: &str) -> Ordering {
    primary_weights(a).cmp(primary_weights(b))
}

fn primary_weights(s: &str) -> impl Iterator<Item = u32> + '_ {
    let mut chars = s.chars().peekable();
    std::iter::from_fn(move || loop {
        let ch = chars.next()?;
        if is_combining_mark(ch) {
            continue;
        }
        let composed = chars.peek().and_then(|&mark| compose_cyrillic(ch, mark));
        if composed.is_some() {
            chars.next();
        }
        return Some(char_weights(composed.unwrap_or(ch)));
    }).flatten()
}

fn is_combining_mark(ch: char) -> bool {
    matches!(ch,
        '\u{0300}'..='\u{036F}'
        | '\u{0483}'..='\u{0489}'
        | '\u{1AB0}'..='\u{1AFF}'
        | '\u{1DC0}'..='\u{1DFF}'
        | '\u{20D0}'..='\u{20FF}'
        | '\u{FE20}'..='\u{FE2F}'
    )
}

/// Letters whose decomposed form would otherwise fold into their base.
fn compose_cyrillic(base: char, mark: char) -> Option<char> {
    let composed = match (base, mark) {
        ('и', '\u{0306}') => 'й',
        ('И', '\u{0306}') => 'Й',
        ('у', '\u{0306}') => 'ў',
        ('У', '\u{0306}') => 'Ў',
        ('і', '\u{0308}') => 'ї',
        ('І', '\u{0308}') => 'Ї',
        _ => return None
    };
    Some(composed)
}

fn weight(group: u32, order: u32) -> u32 {
    (group << 24) | order
}

fn char_weights(ch: char) -> Weights {
    let mut weights = Weights::new();
    for lower in ch.to_lowercase() {
        match lower {
            'ß' => weights.extend([latin('s'), latin('s')]),
            'æ' => weights.extend([latin('a'), latin('e')]),
            'œ' => weights.extend([latin('o'), latin('e')]),
            _ => weights.push(single_weight(lower))
        }
    }
    weights
}

fn single_weight(ch: char) -> u32 {
    if ch.is_whitespace() {
        return weight(SPACE, 0);
    }
    if let Some(pos) = PUNCTUATION_ORDER.chars().position(|p| p == ch) {
        return weight(PUNCTUATION, pos as u32);
    }
    if let Some(pos) = SYMBOL_ORDER.chars().position(|p| p == ch) {
        return weight(SYMBOL, pos as u32);
    }
    if let Some(digit) = ch.to_digit(10) {
        return weight(DIGIT, digit);
    }
    let cyrillic = if ch == 'ё' { 'е' } else { ch };
    if let Some(pos) = CYRILLIC_ORDER.chars().position(|c| c == cyrillic) {
        return weight(CYRILLIC, pos as u32);
    }
    if let Some(base) = fold_latin(ch) {
        return latin(base);
    }
    if ch.is_alphanumeric() {
        return weight(OTHER, ch as u32);
    }
    // Remaining punctuation and symbols keep code point order after the known ones.
    weight(SYMBOL, 0x100 + ch as u32)
}

fn latin(base: char) -> u32 {
    weight(LATIN, base as u32 - 'a' as u32)
}

fn fold_latin(ch: char) -> Option<char> {
    let base = match ch {
        'a'..='z' => ch,
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ģ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => 'i',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ŕ' | 'ř' => 'r',
        'ś' | 'ş' | 'š' => 's',
        'ţ' | 'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => return None
    };
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yo_folds_to_ye() {
        assert_eq!(compare_ru("ё", "е"), Ordering::Equal);
        assert_eq!(compare_ru("Ёлка", "елка"), Ordering::Equal);
        // code point order would put `ё` after `я`
        assert_eq!(compare_ru("ёж", "жук"), Ordering::Less);
        assert_eq!(compare_ru("ёж", "як"), Ordering::Less);
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(compare_ru("Бетон", "бетон"), Ordering::Equal);
        assert_eq!(compare_ru("ARMATURA", "armatura"), Ordering::Equal);
    }

    #[test]
    fn russian_alphabet_order() {
        let mut words = vec!["Щебень", "арматура", "Бетон", "цемент", "Известь", "йод", "Эмаль"];
        words.sort_by(|a, b| compare_ru(a, b));
        assert_eq!(words, ["арматура", "Бетон", "Известь", "йод", "цемент", "Щебень", "Эмаль"]);
    }

    #[test]
    fn cyrillic_before_latin_and_digits_first() {
        assert_eq!(compare_ru("яма", "anchor"), Ordering::Less);
        assert_eq!(compare_ru("9 мешков", "мешок"), Ordering::Less);
        assert_eq!(compare_ru(" а", "а"), Ordering::Less);
    }

    #[test]
    fn digits_are_not_numeric() {
        assert_eq!(compare_ru("10", "9"), Ordering::Less);
        assert_eq!(compare_ru("2", "10"), Ordering::Greater);
    }

    #[test]
    fn latin_diacritics_fold() {
        assert_eq!(compare_ru("café", "CAFE"), Ordering::Equal);
        assert_eq!(compare_ru("straße", "strasse"), Ordering::Equal);
    }

    #[test]
    fn decomposed_marks_are_ignored() {
        assert_eq!(compare_ru("е\u{308}", "ё"), Ordering::Equal);
        assert_eq!(compare_ru("Е\u{308}лка", "елка"), Ordering::Equal);
        assert_eq!(compare_ru("е\u{308}ж", "еа"), Ordering::Greater);
        assert_eq!(compare_ru("cafe\u{301}", "café"), Ordering::Equal);
        assert_eq!(compare_ru("e\u{301}a", "eb"), Ordering::Less);
    }

    #[test]
    fn decomposed_short_i_stays_distinct() {
        assert_eq!(compare_ru("и\u{306}од", "йод"), Ordering::Equal);
        assert_eq!(compare_ru("и\u{306}", "и"), Ordering::Greater);
        assert_eq!(compare_ru("и\u{306}", "к"), Ordering::Less);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(compare_ru("", "а"), Ordering::Less);
        assert_eq!(compare_ru("бетон", "бетонит"), Ordering::Less);
    }
}
