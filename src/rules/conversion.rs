//! Mana exchange rates.
//!
//! One exchange spends a fixed amount of Blue mana and yields an amount of
//! the requested school that depends on the caster's alignment. Neutral
//! realms convert at a flat rate; lawful realms favour White and chaotic
//! realms favour Black.

use crate::world::{Alignment, ManaSchool};

/// Yield of one exchange, neutral alignment.
pub const NEUTRAL_RATE: u32 = 75;

/// Mana gained in `destination` by a caster of `alignment`.
///
/// ```
/// use realm_magic::rules::conversion_amount;
/// use realm_magic::world::{Alignment, ManaSchool};
///
/// assert_eq!(conversion_amount(Alignment::Lawful, ManaSchool::White), 95);
/// assert_eq!(conversion_amount(Alignment::Chaotic, ManaSchool::White), 50);
/// assert_eq!(conversion_amount(Alignment::Neutral, ManaSchool::Red), 75);
/// ```
#[must_use]
pub const fn conversion_amount(alignment: Alignment, destination: ManaSchool) -> u32 {
    use ManaSchool::{Black, Blue, Green, Red, White};

    match alignment {
        Alignment::Neutral => NEUTRAL_RATE,
        Alignment::Lawful => match destination {
            White => 95,
            Green => 90,
            Blue => 75,
            Red | Black => 50,
        },
        Alignment::Chaotic => match destination {
            Black => 95,
            Red => 90,
            Blue => 75,
            Green | White => 50,
        },
    }
}
