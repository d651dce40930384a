//! Arabic headword normalization shared by extraction and lookup.
//!
//! Stored `headword_normalized` values are only useful if queries go through
//! this exact function, so every consumer must call [`normalize_arabic`]
//! rather than re-implementing the folding rules.

/// Combining marks removed before letter folding, in application order.
const STRIPPED_MARKS: [char; 16] = [
    '\u{064B}', // tanween fath
    '\u{064C}', // tanween damm
    '\u{064D}', // tanween kasr
    '\u{064E}', // fatha
    '\u{064F}', // damma
    '\u{0650}', // kasra
    '\u{0651}', // shadda
    '\u{0652}', // sukun
    '\u{0653}', // maddah
    '\u{0654}', // hamza above
    '\u{0655}', // hamza below
    '\u{0656}', // subscript alef
    '\u{0657}', // inverted damma
    '\u{0658}', // noon ghunna
    '\u{0670}', // superscript alef
    '\u{0640}', // tatweel
];

pub fn normalize_arabic(text: &str) -> String {
    let folded = text
        .chars()
        .filter(|character| !STRIPPED_MARKS.contains(character))
        .map(fold_letter)
        .collect::<String>();

    folded.trim().to_string()
}

fn fold_letter(character: char) -> char {
    match character {
        'أ' | 'إ' | 'آ' => 'ا',
        'ة' => 'ه',
        'ى' => 'ي',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_arabic;

    #[test]
    fn strips_diacritics_and_tatweel() {
        assert_eq!(normalize_arabic("أَمَلٌ"), "امل");
        assert_eq!(normalize_arabic("كـتـاب"), "كتاب");
        assert_eq!(normalize_arabic("الرَّحْمٰن"), "الرحمن");
    }

    #[test]
    fn folds_letter_variants() {
        assert_eq!(normalize_arabic("إِيمان"), "ايمان");
        assert_eq!(normalize_arabic("آمال"), "امال");
        assert_eq!(normalize_arabic("مدرسة"), "مدرسه");
        assert_eq!(normalize_arabic("هدى"), "هدي");
    }

    #[test]
    fn empty_and_whitespace_inputs_yield_empty_output() {
        assert_eq!(normalize_arabic(""), "");
        assert_eq!(normalize_arabic("   \n\t"), "");
        assert_eq!(normalize_arabic(" \u{064E} "), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "أَمَلٌ كَأَجَلٍ",
            "  إِسْتِقْبَالٌ  ",
            "مُـــدَرِّسَةٌ",
            "فَتًى",
            "latin text stays",
            "\u{0654}\u{0627} ",
            "",
        ];

        for sample in samples {
            let once = normalize_arabic(sample);
            assert_eq!(normalize_arabic(&once), once, "not idempotent for {sample:?}");
        }
    }
}
