use criterion::{black_box, criterion_group, criterion_main, Criterion};
use league_core::box_score::season_aggregate;
use league_core::league::standings_by_category;
use league_core::model::{Match, StatLine, Team};
use league_core::rules::PointsRule;
use league_core::standings::compute_standings;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn create_teams(categories: usize, per_category: usize) -> Vec<Team> {
    let mut teams = Vec::new();
    for c in 0..categories {
        for i in 0..per_category {
            let id = format!("C{}T{}", c, i);
            teams.push(Team::new(&id, &id, &format!("Category{}", c), "league"));
        }
    }
    teams
}

/// Double round robin inside each category, random scores.
fn create_season(teams: &[Team]) -> Vec<Match> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut matches = Vec::new();
    for home in teams {
        for away in teams.iter().filter(|t| t.category == home.category && t.id != home.id) {
            let id = format!("{}-{}", home.id, away.id);
            let mut m = Match::scheduled(&id, &home.category, &home.id, &away.id);
            let walkover = rng.gen::<f64>() < 0.05;
            if walkover {
                m.finish(20, 0, true);
            } else {
                m.finish(rng.gen_range(40..110), rng.gen_range(40..110), false);
            }
            matches.push(m);
        }
    }
    matches
}

fn bench_compute_standings(c: &mut Criterion) {
    let teams = create_teams(1, 16);
    let matches = create_season(&teams);
    let rule = PointsRule::default();

    c.bench_function("compute_standings_16_teams", |b| {
        b.iter(|| compute_standings(black_box(&teams), black_box(&matches), &rule))
    });
}

fn bench_standings_by_category(c: &mut Criterion) {
    let teams = create_teams(8, 12);
    let matches = create_season(&teams);
    let rule = PointsRule::default();

    c.bench_function("standings_by_category_8x12", |b| {
        b.iter(|| standings_by_category(black_box(&teams), black_box(&matches), &rule))
    });
}

fn bench_season_aggregate(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let lines: Vec<StatLine> = (0..82)
        .map(|i| {
            let mut line = StatLine::new(&format!("m{}", i), "p1", "t1");
            line.two_points_attempted = rng.gen_range(0..15);
            line.two_points_made = rng.gen_range(0..=line.two_points_attempted);
            line.three_points_attempted = rng.gen_range(0..10);
            line.three_points_made = rng.gen_range(0..=line.three_points_attempted);
            line.free_throws_attempted = rng.gen_range(0..8);
            line.free_throws_made = rng.gen_range(0..=line.free_throws_attempted);
            line.rebounds = rng.gen_range(0..12);
            line.normalized()
        })
        .collect();

    c.bench_function("season_aggregate_82_games", |b| {
        b.iter(|| season_aggregate("p1", black_box(&lines)))
    });
}

criterion_group!(
    benches,
    bench_compute_standings,
    bench_standings_by_category,
    bench_season_aggregate,
);
criterion_main!(benches);
