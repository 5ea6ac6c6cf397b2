use crate::error::ValidationError;

/// Plus grand numéro tirable.
pub const MAX_NUMBER: u8 = 49;
/// Numéros par tirage.
pub const PICK_COUNT: usize = 6;

/// Tirage validé. Les champs sont privés : un `Draw` ne se construit que par
/// `new` ou `with_date`, donc ses numéros sont toujours 6 valeurs distinctes
/// dans [1, 49].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    numbers: [u8; PICK_COUNT],
    date: Option<String>,
}

impl Draw {
    /// Seul point d'entrée vers le cœur : 6 numéros distincts dans [1, 49].
    pub fn new(numbers: &[u8]) -> Result<Self, ValidationError> {
        validate_numbers(numbers)?;
        let mut arr = [0u8; PICK_COUNT];
        arr.copy_from_slice(numbers);
        Ok(Self {
            numbers: arr,
            date: None,
        })
    }

    pub fn with_date(numbers: &[u8], date: impl Into<String>) -> Result<Self, ValidationError> {
        let mut draw = Self::new(numbers)?;
        draw.date = Some(date.into());
        Ok(draw)
    }

    /// Numéros dans l'ordre de sortie.
    pub fn numbers(&self) -> &[u8; PICK_COUNT] {
        &self.numbers
    }

    /// Date au format `YYYY-MM-DD`, si connue.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn sorted(&self) -> [u8; PICK_COUNT] {
        let mut sorted = self.numbers;
        sorted.sort();
        sorted
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }
}

pub fn is_valid_number(n: u8) -> bool {
    (1..=MAX_NUMBER).contains(&n)
}

pub fn validate_numbers(numbers: &[u8]) -> Result<(), ValidationError> {
    if numbers.len() != PICK_COUNT {
        return Err(ValidationError::WrongLength(numbers.len()));
    }
    for &n in numbers {
        if !is_valid_number(n) {
            return Err(ValidationError::OutOfRange(n));
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                return Err(ValidationError::Duplicate(numbers[i]));
            }
        }
    }
    Ok(())
}
