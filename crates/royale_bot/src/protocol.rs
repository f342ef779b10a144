//! Line protocol spoken with the game server.
//!
//! Input is a stream of whitespace-separated integers; line breaks carry no
//! meaning. Output is two lines per turn, rendered by the `Display` impls of
//! [`QueenAction`](royale_core::orders::QueenAction) and
//! [`TrainingOrder`](royale_core::orders::TrainingOrder).
//!
//! # Input Layout
//!
//! ```text
//! numSites
//! siteId x y radius                         (numSites times, once per game)
//!
//! gold touchedSite                          (every turn)
//! siteId ignore1 ignore2 structureType owner param1 param2   (numSites times)
//! numUnits
//! x y owner unitType health                 (numUnits times)
//! ```
//!
//! Codes: owner `-1` none, `0` us, `1` enemy; structure `-1` none, `0` mine,
//! `1` tower, `2` barracks (trained kind in `param2`); unit `-1` queen,
//! `0` knight, `1` archer, `2` giant.

use std::io::BufRead;

use royale_core::entities::{
    BuildingSite, Placement, Side, SiteId, StructureKind, Unit, UnitKind, UnitRole,
};
use royale_core::error::GameError;
use royale_core::math::Vec2Fixed;
use royale_core::turn::TurnState;
use thiserror::Error;

/// Result type alias using [`ProtocolError`].
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Input the bot cannot make sense of. Always fatal.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Reading input or writing orders failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended partway through a record.
    #[error("Input ended while expecting {expected}")]
    UnexpectedEof {
        /// Field that was being read.
        expected: &'static str,
    },

    /// A token that is not an integer.
    #[error("Expected integer for {expected}, got '{token}'")]
    InvalidInteger {
        /// Field that was being read.
        expected: &'static str,
        /// Offending token.
        token: String,
    },

    /// A count that is negative.
    #[error("Negative {what}: {value}")]
    NegativeCount {
        /// Which count.
        what: &'static str,
        /// Value received.
        value: i32,
    },

    /// A site id outside the layout.
    #[error("Unknown site id {0}")]
    UnknownSite(i32),

    /// A site id seen twice in one block.
    #[error("Site id {0} reported twice")]
    DuplicateSite(i32),

    /// A structure code outside the known set.
    #[error("Unknown structure type {0}")]
    UnknownStructure(i32),

    /// A unit type code outside the known set.
    #[error("Unknown unit type {0}")]
    UnknownUnitType(i32),

    /// An owner code outside the known set.
    #[error("Unknown owner {0}")]
    UnknownOwner(i32),

    /// The decoded turn is inconsistent.
    #[error(transparent)]
    Snapshot(#[from] GameError),
}

// ============================================================================
// Tokens
// ============================================================================

/// Whitespace-token reader over buffered input.
#[derive(Debug)]
pub struct TokenReader<R> {
    input: R,
    tokens: Vec<String>,
    cursor: usize,
}

impl<R: BufRead> TokenReader<R> {
    /// Wrap a buffered reader.
    pub fn new(input: R) -> Self {
        Self {
            input,
            tokens: Vec::new(),
            cursor: 0,
        }
    }

    /// Whether the input is exhausted. Skips blank lines.
    pub fn at_end(&mut self) -> Result<bool> {
        Ok(!self.fill()?)
    }

    /// Next integer token.
    pub fn int(&mut self, expected: &'static str) -> Result<i32> {
        if !self.fill()? {
            return Err(ProtocolError::UnexpectedEof { expected });
        }
        let token = &self.tokens[self.cursor];
        self.cursor += 1;
        token.parse().map_err(|_| ProtocolError::InvalidInteger {
            expected,
            token: token.clone(),
        })
    }

    /// Next integer token, which must not be negative.
    pub fn count(&mut self, what: &'static str) -> Result<usize> {
        let value = self.int(what)?;
        usize::try_from(value).map_err(|_| ProtocolError::NegativeCount { what, value })
    }

    /// Make sure an unread token is buffered; `false` at end of input.
    fn fill(&mut self) -> Result<bool> {
        let mut line = String::new();
        while self.cursor >= self.tokens.len() {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            self.tokens = line.split_whitespace().map(str::to_owned).collect();
            self.cursor = 0;
        }
        Ok(true)
    }
}

// ============================================================================
// Site layout (read once)
// ============================================================================

/// Fixed geometry of one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteGeometry {
    /// Centre of the site.
    pub position: Vec2Fixed,
    /// Site radius.
    pub radius: u32,
}

/// Site geometry for the whole game, indexed by site id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    sites: Vec<SiteGeometry>,
}

impl SiteLayout {
    /// Number of sites on the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether the map has no sites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Geometry of one site.
    #[must_use]
    pub fn get(&self, id: SiteId) -> Option<&SiteGeometry> {
        self.sites.get(id.0 as usize)
    }

    /// Check a raw id against the layout.
    fn resolve(&self, raw: i32) -> Result<SiteId> {
        match u32::try_from(raw) {
            Ok(id) if (id as usize) < self.sites.len() => Ok(SiteId(id)),
            _ => Err(ProtocolError::UnknownSite(raw)),
        }
    }
}

/// Read the one-time site layout block.
///
/// Ids must cover `0..numSites` exactly once each. Storage grows with the
/// records actually read, so a corrupt count fails at end of input.
pub fn read_layout<R: BufRead>(reader: &mut TokenReader<R>) -> Result<SiteLayout> {
    let count = reader.count("site count")?;
    let mut entries: Vec<(i32, SiteGeometry)> = Vec::new();

    for _ in 0..count {
        let raw = reader.int("site id")?;
        let x = reader.int("site x")?;
        let y = reader.int("site y")?;
        let radius = reader.int("site radius")?;

        entries.push((
            raw,
            SiteGeometry {
                position: Vec2Fixed::from_ints(x, y),
                radius: u32::try_from(radius).unwrap_or(0),
            },
        ));
    }

    let mut slots: Vec<Option<SiteGeometry>> = vec![None; entries.len()];
    for (raw, geometry) in entries {
        let slot = u32::try_from(raw)
            .ok()
            .and_then(|id| slots.get_mut(id as usize))
            .ok_or(ProtocolError::UnknownSite(raw))?;
        if slot.is_some() {
            return Err(ProtocolError::DuplicateSite(raw));
        }
        *slot = Some(geometry);
    }

    // n distinct ids in 0..n leave no slot empty.
    let sites = slots.into_iter().flatten().collect();
    Ok(SiteLayout { sites })
}

// ============================================================================
// Turn state (read every turn)
// ============================================================================

/// Read one turn.
///
/// Returns `Ok(None)` when input ends cleanly before the turn starts.
pub fn read_turn<R: BufRead>(
    reader: &mut TokenReader<R>,
    layout: &SiteLayout,
) -> Result<Option<TurnState>> {
    if reader.at_end()? {
        return Ok(None);
    }

    let gold = reader.int("gold")?;
    let gold = u32::try_from(gold).map_err(|_| ProtocolError::NegativeCount {
        what: "gold",
        value: gold,
    })?;

    let touched = match reader.int("touched site")? {
        -1 => None,
        raw => Some(layout.resolve(raw)?),
    };

    let sites = read_sites(reader, layout)?;

    let unit_count = reader.count("unit count")?;
    let mut units = Vec::new();
    for _ in 0..unit_count {
        units.push(read_unit(reader)?);
    }

    Ok(Some(TurnState::new(gold, touched, sites, &units)?))
}

fn read_sites<R: BufRead>(
    reader: &mut TokenReader<R>,
    layout: &SiteLayout,
) -> Result<Vec<BuildingSite>> {
    let mut slots: Vec<Option<BuildingSite>> = vec![None; layout.len()];

    for _ in 0..layout.len() {
        let raw = reader.int("site id")?;
        let _gold_left = reader.int("site gold")?;
        let _mine_size = reader.int("site max mine size")?;
        let structure_code = reader.int("structure type")?;
        let owner = decode_owner(reader.int("site owner")?)?;
        let param1 = reader.int("site param1")?;
        let param2 = reader.int("site param2")?;

        let id = layout.resolve(raw)?;
        let slot = &mut slots[id.0 as usize];
        if slot.is_some() {
            return Err(ProtocolError::DuplicateSite(raw));
        }

        let geometry = layout.get(id).ok_or(ProtocolError::UnknownSite(raw))?;
        *slot = Some(BuildingSite {
            id,
            placement: Placement::new(geometry.position, owner),
            radius: geometry.radius,
            structure: decode_structure(structure_code, param2)?,
            param1,
            param2,
        });
    }

    Ok(slots.into_iter().flatten().collect())
}

fn read_unit<R: BufRead>(reader: &mut TokenReader<R>) -> Result<Unit> {
    let x = reader.int("unit x")?;
    let y = reader.int("unit y")?;
    let owner = decode_owner(reader.int("unit owner")?)?;
    let role = match reader.int("unit type")? {
        -1 => UnitRole::Queen,
        code => UnitRole::Trained(decode_unit_kind(code)?),
    };
    let health = reader.int("unit health")?;

    Ok(Unit {
        placement: Placement::new(Vec2Fixed::from_ints(x, y), owner),
        role,
        health: u32::try_from(health).unwrap_or(0),
    })
}

fn decode_owner(code: i32) -> Result<Option<Side>> {
    match code {
        -1 => Ok(None),
        0 => Ok(Some(Side::Friendly)),
        1 => Ok(Some(Side::Enemy)),
        other => Err(ProtocolError::UnknownOwner(other)),
    }
}

fn decode_unit_kind(code: i32) -> Result<UnitKind> {
    match code {
        0 => Ok(UnitKind::Knight),
        1 => Ok(UnitKind::Archer),
        2 => Ok(UnitKind::Giant),
        other => Err(ProtocolError::UnknownUnitType(other)),
    }
}

/// Structure on a site.
///
/// The server reports every barracks as `2` with the trained kind in
/// `param2`; the explicit codes `3` and `4` are accepted too.
fn decode_structure(code: i32, param2: i32) -> Result<Option<StructureKind>> {
    match code {
        -1 => Ok(None),
        0 => Ok(Some(StructureKind::Mine)),
        1 => Ok(Some(StructureKind::Tower)),
        2 => Ok(Some(decode_unit_kind(param2)?.barracks())),
        3 => Ok(Some(StructureKind::ArcherBarracks)),
        4 => Ok(Some(StructureKind::GiantBarracks)),
        other => Err(ProtocolError::UnknownStructure(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(input: &str) -> TokenReader<Cursor<&str>> {
        TokenReader::new(Cursor::new(input))
    }

    const LAYOUT: &str = "3\n0 100 200 60\n2 900 500 70\n1 1500 800 80\n";

    #[test]
    fn test_tokens_ignore_line_breaks() {
        let mut r = reader("1 2\n\n  3\n4");
        assert_eq!(r.int("a").unwrap(), 1);
        assert_eq!(r.int("b").unwrap(), 2);
        assert_eq!(r.int("c").unwrap(), 3);
        assert!(!r.at_end().unwrap());
        assert_eq!(r.int("d").unwrap(), 4);
        assert!(r.at_end().unwrap());
    }

    #[test]
    fn test_bad_tokens_are_reported() {
        let mut r = reader("x");
        assert!(matches!(
            r.int("gold"),
            Err(ProtocolError::InvalidInteger { expected: "gold", .. })
        ));

        let mut r = reader("");
        assert!(matches!(
            r.int("gold"),
            Err(ProtocolError::UnexpectedEof { expected: "gold" })
        ));

        let mut r = reader("-3");
        assert!(matches!(
            r.count("unit count"),
            Err(ProtocolError::NegativeCount { value: -3, .. })
        ));
    }

    #[test]
    fn test_layout_is_indexed_by_id() {
        let layout = read_layout(&mut reader(LAYOUT)).unwrap();
        assert_eq!(layout.len(), 3);

        let site = layout.get(SiteId(2)).unwrap();
        assert_eq!(site.position, Vec2Fixed::from_ints(900, 500));
        assert_eq!(site.radius, 70);
        assert_eq!(layout.get(SiteId(1)).unwrap().radius, 80);
        assert!(layout.get(SiteId(3)).is_none());
    }

    #[test]
    fn test_layout_rejects_bad_ids() {
        assert!(matches!(
            read_layout(&mut reader("2\n0 1 1 1\n2 1 1 1\n")),
            Err(ProtocolError::UnknownSite(2))
        ));
        assert!(matches!(
            read_layout(&mut reader("2\n1 1 1 1\n1 1 1 1\n")),
            Err(ProtocolError::DuplicateSite(1))
        ));
        assert!(matches!(
            read_layout(&mut reader("2\n0 1 1 1\n")),
            Err(ProtocolError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_oversized_counts_fail_at_end_of_input() {
        assert!(matches!(
            read_layout(&mut reader("2147483647\n0 1 1 1\n")),
            Err(ProtocolError::UnexpectedEof { expected: "site id" })
        ));

        let layout = read_layout(&mut reader("1\n0 10 10 50\n")).unwrap();
        let huge_units = "0 -1\n0 -1 -1 -1 -1 -1 -1\n2147483647\n5 5 0 -1 100\n";
        assert!(matches!(
            read_turn(&mut reader(huge_units), &layout),
            Err(ProtocolError::UnexpectedEof { expected: "unit x" })
        ));
    }

    #[test]
    fn test_read_turn_decodes_sites_and_units() {
        let input = "\
            150 2\n\
            1 -1 -1 -1 -1 -1 -1\n\
            0 -1 -1 2 0 3 1\n\
            2 -1 -1 1 1 200 300\n\
            3\n\
            100 200 0 -1 180\n\
            1500 800 1 -1 150\n\
            120 210 1 0 25\n";
        let layout = read_layout(&mut reader(LAYOUT)).unwrap();
        let turn = read_turn(&mut reader(input), &layout).unwrap().unwrap();

        assert_eq!(turn.gold, 150);
        assert_eq!(turn.touched_site, Some(SiteId(2)));

        let ids: Vec<u32> = turn.sites().iter().map(|s| s.id.0).collect();
        assert_eq!(ids, [0, 1, 2]);

        let barracks = turn.sites()[0];
        assert_eq!(barracks.structure, Some(StructureKind::ArcherBarracks));
        assert_eq!(barracks.placement.owner, Some(Side::Friendly));
        assert_eq!(barracks.radius, 60);
        assert!(barracks.is_training());

        let tower = turn.sites()[2];
        assert_eq!(tower.structure, Some(StructureKind::Tower));
        assert_eq!(tower.placement.position, Vec2Fixed::from_ints(900, 500));

        assert_eq!(turn.unowned_sites().count(), 1);
        assert_eq!(turn.friendly().queen().health, 180);
        assert_eq!(turn.enemy().units_of(UnitKind::Knight).count(), 1);
        assert_eq!(turn.friendly().queued_units().get(UnitKind::Archer), 2);
    }

    #[test]
    fn test_read_turn_stops_cleanly_at_end() {
        let layout = read_layout(&mut reader(LAYOUT)).unwrap();
        assert!(read_turn(&mut reader("  \n"), &layout).unwrap().is_none());
    }

    #[test]
    fn test_read_turn_fails_midway() {
        let layout = read_layout(&mut reader(LAYOUT)).unwrap();
        assert!(matches!(
            read_turn(&mut reader("100 -1\n0 -1 -1 -1 -1"), &layout),
            Err(ProtocolError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_read_turn_rejects_unknown_codes() {
        let layout = read_layout(&mut reader("1\n0 10 10 50\n")).unwrap();

        let bad_structure = "0 -1\n0 -1 -1 7 0 0 0\n0\n";
        assert!(matches!(
            read_turn(&mut reader(bad_structure), &layout),
            Err(ProtocolError::UnknownStructure(7))
        ));

        let bad_owner = "0 -1\n0 -1 -1 0 5 0 0\n0\n";
        assert!(matches!(
            read_turn(&mut reader(bad_owner), &layout),
            Err(ProtocolError::UnknownOwner(5))
        ));

        let bad_unit = "0 -1\n0 -1 -1 -1 -1 -1 -1\n1\n5 5 0 9 10\n";
        assert!(matches!(
            read_turn(&mut reader(bad_unit), &layout),
            Err(ProtocolError::UnknownUnitType(9))
        ));

        let bad_touch = "0 4\n";
        assert!(matches!(
            read_turn(&mut reader(bad_touch), &layout),
            Err(ProtocolError::UnknownSite(4))
        ));
    }

    #[test]
    fn test_read_turn_requires_queens() {
        let layout = read_layout(&mut reader("1\n0 10 10 50\n")).unwrap();
        let no_enemy_queen = "0 -1\n0 -1 -1 -1 -1 -1 -1\n1\n5 5 0 -1 100\n";
        assert!(matches!(
            read_turn(&mut reader(no_enemy_queen), &layout),
            Err(ProtocolError::Snapshot(GameError::MissingQueen(Side::Enemy)))
        ));
    }

    #[test]
    fn test_explicit_barracks_codes() {
        assert_eq!(
            decode_structure(3, -1).unwrap(),
            Some(StructureKind::ArcherBarracks)
        );
        assert_eq!(
            decode_structure(4, -1).unwrap(),
            Some(StructureKind::GiantBarracks)
        );
        assert_eq!(
            decode_structure(2, 2).unwrap(),
            Some(StructureKind::GiantBarracks)
        );
        assert!(decode_structure(2, 5).is_err());
    }
}
