use serde::Serialize;

/// What a prediction code means to the person reading the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub result: &'static str,
    pub description: &'static str,
}

pub const GOOD: Interpretation = Interpretation {
    result: "Good",
    description: "Low Risk - The loan or credit application is likely to be safe.",
};

pub const BAD: Interpretation = Interpretation {
    result: "Bad",
    description: "High Risk - The loan or credit application is likely to be risky.",
};

pub const UNKNOWN: Interpretation = Interpretation {
    result: "Unknown",
    description: "Unknown Credit Risk: Unable to determine the risk level from the provided information.",
};

/// Maps a class code from the trained label space. Never fails.
pub fn interpret(code: i64) -> Interpretation {
    match code {
        1 => GOOD,
        2 => BAD,
        _ => UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(interpret(1).result, "Good");
        assert!(interpret(1).description.starts_with("Low Risk"));
        assert_eq!(interpret(2).result, "Bad");
        assert!(interpret(2).description.starts_with("High Risk"));
    }

    #[test]
    fn everything_else_is_unknown() {
        for code in [0, 3, -1, i64::MIN, i64::MAX] {
            assert_eq!(interpret(code), UNKNOWN);
        }
        assert!(UNKNOWN.description.contains("Unable to determine"));
    }
}
