/// The 28 letters of the Arabic alphabet in dictionary order.
pub const ARABIC_LETTERS: [char; 28] = [
    'ا', 'ب', 'ت', 'ث', 'ج', 'ح', 'خ', 'د', 'ذ', 'ر', 'ز', 'س', 'ش', 'ص',
    'ض', 'ط', 'ظ', 'ع', 'غ', 'ف', 'ق', 'ك', 'ل', 'م', 'ن', 'ه', 'و', 'ي',
];

pub const LETTER_COUNT: usize = ARABIC_LETTERS.len();

/// Index into [`ARABIC_LETTERS`], always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(usize);

impl Letter {
    pub const FIRST: Letter = Letter(0);

    /// Wraps out-of-range indices instead of failing.
    pub fn from_index(index: usize) -> Self {
        Letter(index % LETTER_COUNT)
    }

    pub fn all() -> impl Iterator<Item = Letter> {
        (0..LETTER_COUNT).map(Letter)
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn glyph(self) -> char {
        ARABIC_LETTERS[self.0]
    }

    pub fn next(self) -> Self {
        Letter((self.0 + 1) % LETTER_COUNT)
    }

    pub fn previous(self) -> Self {
        Letter((self.0 + LETTER_COUNT - 1) % LETTER_COUNT)
    }
}

/// Marking state of a single letter. `next` steps through the fixed
/// four-state cycle and wraps back to `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LetterState {
    #[default]
    Default,
    Green,
    Red,
    Dim,
}

impl LetterState {
    pub fn next(self) -> Self {
        match self {
            LetterState::Default => LetterState::Green,
            LetterState::Green => LetterState::Red,
            LetterState::Red => LetterState::Dim,
            LetterState::Dim => LetterState::Default,
        }
    }
}

/// Marking state for every letter of the alphabet. The board always holds
/// all 28 letters; only their states change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterBoard {
    states: [LetterState; LETTER_COUNT],
}

impl Default for LetterBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl LetterBoard {
    pub fn new() -> Self {
        Self {
            states: [LetterState::Default; LETTER_COUNT],
        }
    }

    /// Advances the letter one step through the cycle and returns the new
    /// state.
    pub fn cycle(&mut self, letter: Letter) -> LetterState {
        let next = self.states[letter.index()].next();
        self.states[letter.index()] = next;
        next
    }

    pub fn state_of(&self, letter: Letter) -> LetterState {
        self.states[letter.index()]
    }

    /// All letters in alphabet order, paired with their current state.
    pub fn iter(&self) -> impl Iterator<Item = (Letter, LetterState)> + '_ {
        Letter::all().map(move |letter| (letter, self.states[letter.index()]))
    }
}
