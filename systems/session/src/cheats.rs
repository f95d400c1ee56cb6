/// Shortcut unlocked by typing a digit sequence during play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cheat {
    /// Jump straight to the final level.
    JumpToFinal,
    /// Advance to the next level, wrapping to the first.
    SkipLevel,
}

const CAPACITY: usize = 5;
const CODES: [(&str, Cheat); 2] = [("4321", Cheat::JumpToFinal), ("3211", Cheat::SkipLevel)];

/// Rolling buffer of the most recently typed digits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SecretCode {
    digits: String,
}

impl SecretCode {
    /// Records a typed character and reports a completed cheat, if any.
    ///
    /// Non-digit characters are ignored. A match clears the buffer.
    pub fn push(&mut self, typed: char) -> Option<Cheat> {
        if !typed.is_ascii_digit() {
            return None;
        }
        self.digits.push(typed);
        if self.digits.len() > CAPACITY {
            let _ = self.digits.remove(0);
        }

        let cheat = CODES
            .iter()
            .find(|(code, _)| self.digits.ends_with(code))
            .map(|&(_, cheat)| cheat)?;
        self.digits.clear();
        Some(cheat)
    }

    /// Digits currently held in the buffer.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_all(code: &mut SecretCode, text: &str) -> Vec<Cheat> {
        text.chars().filter_map(|c| code.push(c)).collect()
    }

    #[test]
    fn recognises_both_sequences() {
        let mut code = SecretCode::default();
        assert_eq!(type_all(&mut code, "4321"), vec![Cheat::JumpToFinal]);
        assert_eq!(type_all(&mut code, "3211"), vec![Cheat::SkipLevel]);
    }

    #[test]
    fn match_clears_buffer() {
        let mut code = SecretCode::default();
        assert_eq!(type_all(&mut code, "94321"), vec![Cheat::JumpToFinal]);
        assert_eq!(code.digits(), "");
    }

    #[test]
    fn buffer_keeps_last_five_digits() {
        let mut code = SecretCode::default();
        assert!(type_all(&mut code, "1234567").is_empty());
        assert_eq!(code.digits(), "34567");
    }

    #[test]
    fn letters_are_ignored() {
        let mut code = SecretCode::default();
        assert_eq!(type_all(&mut code, "43a21"), vec![Cheat::JumpToFinal]);
    }
}
