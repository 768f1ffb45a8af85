use orchestrator::domain::fixtures::SnapshotBuilder;
use orchestrator::domain::{GameSnapshot, Phase};

/// Alaska and Ontario for alice, Brazil for bob; alice to reinforce 5.
pub fn north_america(pool: u32) -> GameSnapshot {
    SnapshotBuilder::new()
        .continent("North America", 5)
        .continent("South America", 2)
        .territory("Alaska", "North America", &[])
        .territory("Ontario", "North America", &[])
        .territory("Brazil", "South America", &[])
        .border("Alaska", "Ontario")
        .border("Ontario", "Brazil")
        .player(1, "alice", &[("Alaska", 3), ("Ontario", 2)])
        .player(2, "bob", &[("Brazil", 4)])
        .current("alice")
        .phase(Phase::Reinforce)
        .pool(pool)
        .build()
}

/// Alaska - Brazil - Congo chain; alice holds a strong Alaska.
pub fn short_war() -> GameSnapshot {
    SnapshotBuilder::new()
        .continent("North America", 5)
        .continent("South America", 2)
        .continent("Africa", 3)
        .territory("Alaska", "North America", &[])
        .territory("Brazil", "South America", &[])
        .territory("Congo", "Africa", &[])
        .border("Alaska", "Brazil")
        .border("Brazil", "Congo")
        .player(1, "alice", &[("Alaska", 10)])
        .player(2, "bob", &[("Brazil", 1), ("Congo", 1)])
        .current("alice")
        .phase(Phase::Reinforce)
        .pool(3)
        .build()
}
