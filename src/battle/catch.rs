//! Capture odds for wild objectmon.

use crate::data::get_species_data;
use crate::errors::SpeciesDataResult;
use crate::objectmon::ObjectmonInst;
use schema::StatusCondition;

/// Status makes a target easier to hold: immobilizing conditions double the
/// odds, everything else gives half again.
pub fn status_multiplier(status: Option<StatusCondition>) -> f32 {
    match status {
        Some(StatusCondition::Sleep) | Some(StatusCondition::Freeze) => 2.0,
        Some(_) => 1.5,
        None => 1.0,
    }
}

/// Catch chance as a percentage in 0..=85.
///
/// Starts from the species catch rate, scaled by how hurt the target is
/// (down to a third at full health, approaching full rate near zero HP),
/// status, and the capsule's own multiplier, then capped at 255 and divided
/// by 3 to land in percent space.
pub fn calculate_catch_rate(
    target: &ObjectmonInst,
    ball_multiplier: f32,
) -> SpeciesDataResult<f32> {
    let data = get_species_data(target.species)?;
    let hp_factor = (3.0 - 2.0 * target.hp_fraction()) / 3.0;
    let modified = data.catch_rate as f32
        * hp_factor
        * status_multiplier(target.status)
        * ball_multiplier;
    Ok(modified.min(255.0) / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;
    use schema::Species;

    fn wild(species_id: u16, level: u8) -> ObjectmonInst {
        let mut rng = GameRng::scripted(vec![10; 8]);
        ObjectmonInst::from_species_id(species_id, level, None, &mut rng).unwrap()
    }

    #[test]
    fn full_health_mug_is_a_third_of_base() {
        let mug = wild(2, 4);
        assert_eq!(mug.species, Species::Mug);
        // catch_rate 255, full HP: 255 * (1/3) / 3 = 28.33...
        let rate = calculate_catch_rate(&mug, 1.0).unwrap();
        assert!((rate - 255.0 / 9.0).abs() < 0.01);
    }

    #[test]
    fn low_health_raises_the_odds() {
        let mut mug = wild(2, 4);
        let healthy = calculate_catch_rate(&mug, 1.0).unwrap();
        mug.set_hp(1);
        let hurt = calculate_catch_rate(&mug, 1.0).unwrap();
        assert!(hurt > healthy * 2.0);
    }

    #[test]
    fn sleep_doubles_and_burn_adds_half() {
        let mut mug = wild(2, 4);
        let plain = calculate_catch_rate(&mug, 1.0).unwrap();
        mug.status = Some(StatusCondition::Burn);
        let burned = calculate_catch_rate(&mug, 1.0).unwrap();
        mug.status = Some(StatusCondition::Sleep);
        let asleep = calculate_catch_rate(&mug, 1.0).unwrap();
        assert!((burned - plain * 1.5).abs() < 0.01);
        assert!((asleep - plain * 2.0).abs() < 0.01);
    }

    #[test]
    fn rate_never_exceeds_the_cap() {
        let mut mug = wild(2, 4);
        mug.set_hp(1);
        mug.status = Some(StatusCondition::Sleep);
        let rate = calculate_catch_rate(&mug, 4.0).unwrap();
        assert!(rate <= 85.0);
    }
}
