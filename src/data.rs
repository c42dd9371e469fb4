//! Static game data. The RON catalogs under `data/` are compiled into the
//! binary and parsed once on first access.

use crate::errors::{MoveDataError, MoveDataResult, SpeciesDataError, SpeciesDataResult};
use schema::{Move, MoveData, Species, SpeciesData};
use std::collections::HashMap;
use std::sync::LazyLock;

static SPECIES_DATA: LazyLock<HashMap<Species, SpeciesData>> = LazyLock::new(|| {
    ron::from_str(include_str!("../data/species.ron"))
        .expect("embedded species catalog failed to parse")
});

static MOVE_DATA: LazyLock<HashMap<Move, MoveData>> = LazyLock::new(|| {
    ron::from_str(include_str!("../data/moves.ron"))
        .expect("embedded move catalog failed to parse")
});

pub fn get_species_data(species: Species) -> SpeciesDataResult<&'static SpeciesData> {
    SPECIES_DATA
        .get(&species)
        .ok_or(SpeciesDataError::MissingCatalogEntry(species))
}

pub fn get_move_data(move_: Move) -> MoveDataResult<&'static MoveData> {
    MOVE_DATA.get(&move_).ok_or(MoveDataError::MoveNotFound(move_))
}

/// Max PP straight from the catalog. The embedded catalog is total over
/// [`Move`], so a missing entry is a broken data file and fails loudly.
pub fn get_move_max_pp(move_: Move) -> u8 {
    match get_move_data(move_) {
        Ok(data) => data.max_pp,
        Err(err) => panic!("{}", err),
    }
}

/// Cross-checks the embedded catalogs: every species and move has an entry,
/// learnsets only reference cataloged moves, and evolution targets exist.
pub fn validate_catalogs() -> Result<(), String> {
    for species in Species::ALL {
        let data = get_species_data(species)
            .map_err(|err| format!("species catalog: {}", err))?;
        if data.types.is_empty() || data.types.len() > 2 {
            return Err(format!(
                "{} must have one or two types, has {}",
                species,
                data.types.len()
            ));
        }
        for move_ in data.learnset.values() {
            get_move_data(*move_).map_err(|err| {
                format!("{} learnset references a missing move: {}", species, err)
            })?;
        }
        if let Some(evolution) = &data.evolution {
            get_species_data(evolution.evolves_into).map_err(|err| {
                format!("{} evolution target is missing: {}", species, err)
            })?;
        }
    }
    for move_ in Move::ALL {
        let data = get_move_data(move_).map_err(|err| format!("move catalog: {}", err))?;
        if data.is_damaging() && data.power == 0 {
            return Err(format!("{} is damaging but has zero power", move_));
        }
        if data.accuracy > 100 {
            return Err(format!("{} accuracy exceeds 100", move_));
        }
    }
    Ok(())
}
