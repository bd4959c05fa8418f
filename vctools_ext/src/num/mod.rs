pub mod range;

#[inline]
#[must_use]
pub const fn u64_to_i64_truncating(n: u64) -> i64 {
    (n as i128) as i64
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::u64_to_i64_truncating;

    #[rstest]
    #[case(0, 0)]
    #[case(175_928_847_299_117_063, 175_928_847_299_117_063)]
    #[case(u64::MAX, -1)]
    #[case(1 << 63, i64::MIN)]
    fn bigint_column_representation(#[case] id: u64, #[case] stored: i64) {
        assert_eq!(u64_to_i64_truncating(id), stored);
    }
}
