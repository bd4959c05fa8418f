use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;

/// Length and truncation in user-perceived characters.
///
/// Discord counts select option labels in characters, but a channel name like
/// `🎙️ lounge` is several `char`s for one visible symbol; cutting on `char`
/// boundaries would leave dangling joiners or variation selectors behind.
pub trait AsGrapheme: UnicodeSegmentation {
    fn grapheme_len(&self) -> usize {
        self.graphemes(true).count()
    }

    fn grapheme_truncate(&self, new_len: usize) -> Cow<'_, Self>
    where
        Self: ToOwned,
        Self::Owned: for<'a> FromIterator<&'a str>,
    {
        if self.grapheme_len() <= new_len {
            Cow::Borrowed(self)
        } else {
            Cow::Owned(self.graphemes(true).take(new_len).collect())
        }
    }
}

impl<T> AsGrapheme for T where T: UnicodeSegmentation + ?Sized {}
