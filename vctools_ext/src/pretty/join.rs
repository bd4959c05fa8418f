use std::borrow::Borrow;

pub trait PrettyJoiner {
    /// Joins with `sep`, using `last_sep` before the final element.
    fn pretty_join(&self, sep: &str, last_sep: &str) -> String;

    fn pretty_join_with_and(&self) -> String {
        self.pretty_join(", ", " and ")
    }
}

impl<S: Borrow<str>> PrettyJoiner for [S] {
    fn pretty_join(&self, sep: &str, last_sep: &str) -> String {
        match self {
            [] => String::new(),
            [only] => only.borrow().to_owned(),
            [init @ .., last] => {
                let mut joined = init
                    .iter()
                    .map(Borrow::borrow)
                    .collect::<Vec<&str>>()
                    .join(sep);
                joined.push_str(last_sep);
                joined.push_str(last.borrow());
                joined
            }
        }
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::PrettyJoiner;

    #[rstest]
    #[case([], "")]
    #[case(["<#1>"], "<#1>")]
    #[case(["<#1>", "<#2>"], "<#1> and <#2>")]
    #[case(["<#1>", "<#2>", "<#3>"], "<#1>, <#2> and <#3>")]
    fn string_pretty_join_with_and<const N: usize>(
        #[case] input: [&str; N],
        #[case] expected: &str,
    ) {
        assert_eq!(input.pretty_join_with_and(), expected);
    }

    #[test]
    fn owned_strings_join() {
        let names = vec![String::from("Lobby"), String::from("AFK")];
        assert_eq!(names.pretty_join(" | ", " / "), "Lobby / AFK");
    }
}
