/// Scanner on a string.
///
/// Provide convienient APIs on operation.
pub(crate) struct Scanner {
    /// characters splitted.
    chars: Vec<char>,

    /// Current position.
    position: usize,
}

impl Scanner {
    pub(crate) fn new(source: &str) -> Scanner {
        Self {
            chars: source.chars().collect(),
            position: 0,
        }
    }

    /// Check the scanner process reached the end or not.
    pub fn done(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Get character at the current position.
    pub fn curr(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// Get the character at `index`.
    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Move the position forward and return the character walked through.
    ///
    /// Return `None` if already finished.
    pub fn next(&mut self) -> Option<char> {
        let ch = self.curr()?;
        self.position += 1;
        Some(ch)
    }

    /// Advance while `f` accepts the current character.
    pub fn skip_while(&mut self, f: impl Fn(char) -> bool) {
        while self.curr().is_some_and(&f) {
            self.position += 1;
        }
    }

    /// Find the first position at or after the current one holding any of `targets`.
    pub fn find_any(&self, targets: &[char]) -> Option<usize> {
        self.chars[self.position..]
            .iter()
            .position(|x| targets.contains(x))
            .map(|x| x + self.position)
    }

    /// Move to `position`, clamped to the end.
    pub fn seek(&mut self, position: usize) {
        self.position = position.min(self.chars.len());
    }

    /// Get chars from [start] to [end] as string, excluding end pos.
    ///
    /// The caller must ensure sizes not out of range.
    pub fn get_range(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    pub fn position(&self) -> usize {
        self.position
    }
}
