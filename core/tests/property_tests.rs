use proptest::prelude::*;
use rockhound_core::*;
use std::collections::BTreeSet;

fn specimen(value: u32) -> Mineral {
    let catalog = Catalog::builtin().unwrap();
    let mut mineral = catalog.get_by_id("quartz").unwrap().clone();
    mineral.value = value;
    mineral
}

proptest! {
    /// Identified items sell at full value, unidentified at the floor of 30%.
    #[test]
    fn sell_value_applies_penalty(value in 0u32..1_000_000) {
        let identified = InventoryItem::identified(specimen(value));
        let unidentified = InventoryItem::unidentified(specimen(value));

        prop_assert_eq!(sell_value(&identified), value);
        prop_assert_eq!(sell_value(&unidentified), value * 3 / 10);
        prop_assert!(sell_value(&unidentified) <= value);
    }

    #[test]
    fn inventory_value_is_sum_of_lines(values in prop::collection::vec((1u32..500, any::<bool>()), 0..20)) {
        let items: Vec<_> = values
            .iter()
            .map(|&(value, identified)| {
                if identified {
                    InventoryItem::identified(specimen(value))
                } else {
                    InventoryItem::unidentified(specimen(value))
                }
            })
            .collect();

        let expected: u32 = items.iter().map(sell_value).sum();
        prop_assert_eq!(inventory_value(&items), expected);
        prop_assert_eq!(Receipt::new(&items).total, expected);
    }

    /// More tools never score higher, and misses never score at all.
    #[test]
    fn score_is_monotonic_in_tools(tools in 0usize..20) {
        prop_assert!(tool_shed_score(true, tools + 1) <= tool_shed_score(true, tools));
        prop_assert_eq!(tool_shed_score(false, tools), 0);
        if tools >= 6 {
            prop_assert_eq!(tool_shed_score(true, tools), 100);
        }
        prop_assert!(tool_shed_score(true, tools) <= MAX_ROUND_SCORE);
    }

    /// Revealed cells stay revealed, mineral cells are never marked empty, and the battery never
    /// drops below zero or changes on a refused dig.
    #[test]
    fn grid_invariants_hold_over_any_dig_sequence(
        seed in any::<u64>(),
        battery in 0u16..40,
        digs in prop::collection::vec((0u8..8, 0u8..8), 0..80),
    ) {
        let catalog = Catalog::builtin().unwrap();
        let pool = catalog.get_by_location("gem-quarry");
        let mut rng = seeded_rng(seed);
        let mut grid = MiningGrid::generate(&GameConfig::default(), &pool, battery, &mut rng);
        let mut revealed = BTreeSet::new();

        for coords in digs {
            let before = grid.clone();
            let outcome = grid.reveal(coords).unwrap();

            if before.battery() == 0 {
                prop_assert_eq!(outcome, RevealOutcome::NoChange);
                prop_assert_eq!(&grid, &before);
            }
            if outcome.has_update() {
                prop_assert_eq!(grid.battery(), before.battery() - 1);
                revealed.insert(coords);
            } else {
                prop_assert_eq!(grid.battery(), before.battery());
            }
            prop_assert!(grid.battery() <= battery);

            for cell in grid.cells() {
                prop_assert!(!(cell.mineral().is_some() && cell.is_empty()));
            }
            for &coords in &revealed {
                prop_assert!(grid[coords].is_revealed());
            }
        }
        prop_assert_eq!(usize::from(grid.revealed_count()), revealed.len());
    }

    #[test]
    fn high_scores_stay_sorted_and_bounded(
        tool_shed in prop::collection::vec(0u32..1600, 0..30),
        shop in prop::collection::vec(("[a-z ]{0,40}", 0u32..500), 0..30),
    ) {
        let mut board = ScoreBoard::new(MemoryStore::new());
        for score in tool_shed {
            board.save_tool_shed_score(score);
        }
        for (name, score) in &shop {
            board.save_named_score(name, *score);
        }

        let scores = board.tool_shed_scores();
        prop_assert!(scores.len() <= MAX_ENTRIES);
        prop_assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));

        let named = board.named_scores();
        prop_assert!(named.len() <= MAX_ENTRIES);
        prop_assert!(named.windows(2).all(|pair| pair[0].score >= pair[1].score));
        prop_assert!(named.iter().all(|entry| !entry.name.is_empty()
            && entry.name.chars().count() <= MAX_NAME_LEN));
    }

    #[test]
    fn session_never_repeats_a_mineral(seed in any::<u64>()) {
        let catalog = Catalog::builtin().unwrap();
        let mut rng = seeded_rng(seed);
        let mut scores = ScoreBoard::new(MemoryStore::new());
        let mut session = ToolShedSession::start(&catalog, None, &GameConfig::default(), &mut rng).unwrap();
        let mut seen = BTreeSet::new();

        loop {
            prop_assert!(seen.insert(session.target().id.clone()));
            session.skip().unwrap();
            if let RoundAdvance::Finished { total } = session.next_round(&catalog, &mut rng, &mut scores).unwrap() {
                prop_assert_eq!(total, 0);
                break;
            }
        }
        prop_assert_eq!(seen.len(), 10);
    }
}

#[test]
fn mineral_density_is_about_35_percent() {
    let catalog = Catalog::builtin().unwrap();
    let pool = catalog.get_by_location("cave-mine");
    let mut rng = seeded_rng(1234);
    let mut minerals = 0usize;
    let mut counts = std::collections::BTreeMap::new();
    let grids = 500;

    for _ in 0..grids {
        let grid = MiningGrid::generate(&GameConfig::default(), &pool, 30, &mut rng);
        for mineral in grid.cells().filter_map(|cell| cell.mineral()) {
            minerals += 1;
            *counts.entry(mineral.id.clone()).or_insert(0usize) += 1;
        }
    }

    let density = minerals as f64 / (grids * 64) as f64;
    assert!((0.32..0.38).contains(&density), "density {density}");

    // every pool member shows up, none wildly over-represented
    assert_eq!(counts.len(), pool.len());
    let expected = minerals as f64 / pool.len() as f64;
    for (id, count) in counts {
        assert!(
            (count as f64 - expected).abs() < expected * 0.25,
            "{id} drawn {count} times, expected about {expected:.0}"
        );
    }
}

/// Battery of one on a find: payout straight away, the find can still be named.
#[test]
fn last_charge_find_is_still_paid() {
    let catalog = Catalog::builtin().unwrap();
    let garnet = catalog.get_by_id("garnet").unwrap().clone();
    let location = catalog.location("gem-quarry").unwrap().clone();
    let grid = MiningGrid::from_placements(8, &[((4, 4), garnet)], 1).unwrap();
    let mut trip = MiningTrip::with_grid(location, GameConfig::default(), grid);
    let mut rng = seeded_rng(0);

    assert!(trip.dig((4, 4)).unwrap().depleted);
    assert_eq!(trip.phase(), TripPhase::Payout);

    trip.reveal_tool(Tool::Hardness).unwrap();
    assert!(trip.guess("GARNET", &mut rng).unwrap().is_correct());
    assert_eq!(trip.receipt().total, 28);
}
