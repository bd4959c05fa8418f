use std::{borrow::Cow, ops::Add};

use crate::as_grapheme::AsGrapheme;

pub trait PrettyTruncator: AsGrapheme + ToOwned + 'static
where
    for<'a> Cow<'a, Self>: Add<&'a Self, Output = Cow<'a, Self>>,
{
    fn trail() -> &'static Self;

    /// Truncates to at most `new_len` graphemes, marking the cut with [`Self::trail`].
    fn pretty_truncate(&self, new_len: usize) -> Cow<'_, Self>
    where
        for<'a> <Self as ToOwned>::Owned: FromIterator<&'a str>,
    {
        if self.grapheme_len() <= new_len {
            return Cow::Borrowed(self);
        }

        let trail = Self::trail();
        let kept = new_len.saturating_sub(trail.grapheme_len());
        self.grapheme_truncate(kept) + trail
    }
}

impl PrettyTruncator for str {
    fn trail() -> &'static Self {
        "\u{2026}"
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::PrettyTruncator;

    #[rstest]
    #[case("", "")]
    #[case("AFK", "AFK")]
    #[case("Music", "Music")]
    #[case("Lounge", "Loun\u{2026}")]
    #[case("Gaming Room 2", "Gami\u{2026}")]
    #[case("\u{1f399}\u{fe0f}\u{1f3a7}\u{1f3b5}\u{1f3b6}\u{1f50a}\u{1f508}", "\u{1f399}\u{fe0f}\u{1f3a7}\u{1f3b5}\u{1f3b6}\u{2026}")]
    fn string_pretty_truncate(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(input.pretty_truncate(5), expected);
    }

    #[test]
    fn tiny_limit_keeps_only_trail() {
        assert_eq!("Voice".pretty_truncate(1), "\u{2026}");
    }
}
