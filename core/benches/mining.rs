use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rockhound_core::*;
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let config = GameConfig::default();
    let mut group = c.benchmark_group("generate");

    for location in catalog.locations() {
        let pool = catalog.get_by_location(&location.id);
        group.bench_with_input(BenchmarkId::from_parameter(&location.id), &pool, |b, pool| {
            let mut rng = seeded_rng(0x5eed);
            b.iter(|| {
                MiningGrid::generate(
                    &config,
                    black_box(pool),
                    location.starting_battery(),
                    &mut rng,
                )
            })
        });
    }
    group.finish();
}

/// Digs row by row, naming every find, until the battery runs out.
fn bench_full_trip(c: &mut Criterion) {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let config = GameConfig::default();

    c.bench_function("full trip (cave-mine)", |b| {
        let mut rng = seeded_rng(42);
        b.iter(|| {
            let mut trip = MiningTrip::start(&catalog, "cave-mine", &config, &mut rng)
                .expect("known location");
            for coords in iter_coords(config.grid_size) {
                if trip.is_finished() {
                    break;
                }
                trip.dig(coords).expect("in bounds");
                let name = trip
                    .pending()
                    .filter(|find| !find.identification.is_resolved())
                    .map(|find| find.identification.mineral().name.clone());
                if let Some(name) = name {
                    trip.guess(&name, &mut rng).expect("pending find");
                }
                trip.take_scheduled();
            }
            black_box(trip.receipt())
        })
    });
}

criterion_group!(benches, bench_generate, bench_full_trip);
criterion_main!(benches);
