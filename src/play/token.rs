use crate::Chips;

/// Canonical move vocabulary at the orchestration boundary. This is the one
/// grammar: the legal-move offering renders through [std::fmt::Display] and
/// provider responses validate through [std::str::FromStr], so the two paths
/// cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveToken {
    Fold,
    Check,
    Call,
    RaiseTo(Chips),
}

impl std::str::FromStr for MoveToken {
    type Err = anyhow::Error;

    /// exactly `fold`, `check`, `call`, or `raise_to:<integer>`; a single
    /// space after the colon is tolerated, nothing else is
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fold" => Ok(Self::Fold),
            "check" => Ok(Self::Check),
            "call" => Ok(Self::Call),
            _ => match s.strip_prefix("raise_to:") {
                Some(amount) => amount
                    .strip_prefix(' ')
                    .unwrap_or(amount)
                    .parse::<Chips>()
                    .map(Self::RaiseTo)
                    .map_err(|_| anyhow::anyhow!("malformed raise amount in {:?}", s)),
                None => Err(anyhow::anyhow!("unrecognized move token {:?}", s)),
            },
        }
    }
}

impl std::fmt::Display for MoveToken {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Fold => write!(f, "fold"),
            Self::Check => write!(f, "check"),
            Self::Call => write!(f, "call"),
            Self::RaiseTo(amount) => write!(f, "raise_to:{}", amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<MoveToken, anyhow::Error> {
        s.parse::<MoveToken>()
    }

    #[test]
    fn plain_tokens() {
        assert_eq!(parse("fold").unwrap(), MoveToken::Fold);
        assert_eq!(parse("check").unwrap(), MoveToken::Check);
        assert_eq!(parse("call").unwrap(), MoveToken::Call);
    }

    #[test]
    fn raise_with_and_without_space() {
        assert_eq!(parse("raise_to:150").unwrap(), MoveToken::RaiseTo(150));
        assert_eq!(parse("raise_to: 150").unwrap(), MoveToken::RaiseTo(150));
    }

    #[test]
    fn rejects_anything_else() {
        for bad in [
            "blah",
            "FOLD",
            "fold please",
            "raise_to:",
            "raise_to:abc",
            "raise_to:  150",
            "raise_to:-5",
            "raise 150",
            "",
        ] {
            assert!(parse(bad).is_err(), "{:?} should not parse", bad);
        }
    }

    #[test]
    fn canonical_rendering() {
        assert_eq!(MoveToken::RaiseTo(150).to_string(), "raise_to:150");
        assert_eq!(MoveToken::Fold.to_string(), "fold");
    }
}
