use rand::Rng;
use twenty48_core::engine::{Board, Direction};

/// How an unattended player picks its next intent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Uniform over the directions that change the board.
    #[default]
    Random,
    /// Left, Right, Up, Down in turn, skipping directions that change nothing.
    Cycle,
    /// The direction that leaves the most empty cells; ties go to `Direction::ALL` order.
    Greedy,
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(StrategyKind::Random),
            "cycle" => Ok(StrategyKind::Cycle),
            "greedy" => Ok(StrategyKind::Greedy),
            other => Err(format!("unknown strategy {other:?}")),
        }
    }
}

fn select_move_random<R: Rng + ?Sized>(legal: &[Direction], rng: &mut R) -> Option<Direction> {
    if legal.is_empty() { return None; }
    Some(legal[rng.gen_range(0..legal.len())])
}

fn select_move_cycle(legal: &[Direction], step: u64) -> Option<Direction> {
    let start = (step % 4) as usize;
    (0..4)
        .map(|offset| Direction::ALL[(start + offset) % 4])
        .find(|dir| legal.contains(dir))
}

fn select_move_greedy(board: &Board, legal: &[Direction]) -> Option<Direction> {
    let mut best: Option<(Direction, usize)> = None;
    for &dir in legal {
        let empty = board.shifted(dir).count_empty();
        match best {
            Some((_, best_empty)) if best_empty >= empty => {}
            _ => best = Some((dir, empty)),
        }
    }
    best.map(|(dir, _)| dir)
}

/// Pick the next intent for `board`, or `None` when no direction changes it.
pub(crate) fn select_move<R: Rng + ?Sized>(
    kind: StrategyKind,
    board: &Board,
    step: u64,
    rng: &mut R,
) -> Option<Direction> {
    let legal = board.legal_moves();
    match kind {
        StrategyKind::Random => select_move_random(&legal, rng),
        StrategyKind::Cycle => select_move_cycle(&legal, step),
        StrategyKind::Greedy => select_move_greedy(board, &legal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn board(rows: &[&[i64]]) -> Board {
        Board::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn stuck_board_has_no_move() {
        let stuck = board(&[&[2, 4], &[4, 2]]);
        let mut rng = StdRng::seed_from_u64(0);
        for kind in [StrategyKind::Random, StrategyKind::Cycle, StrategyKind::Greedy] {
            assert_eq!(select_move(kind, &stuck, 0, &mut rng), None);
        }
    }

    #[test]
    fn random_only_picks_legal_moves() {
        // only Right and Down change this board
        let b = board(&[&[2, 0], &[0, 0]]);
        let mut rng = StdRng::seed_from_u64(4);
        for step in 0..50 {
            let dir = select_move(StrategyKind::Random, &b, step, &mut rng).unwrap();
            assert!(matches!(dir, Direction::Right | Direction::Down));
        }
    }

    #[test]
    fn cycle_rotates_and_skips_no_ops() {
        let open = board(&[&[0, 0, 0], &[0, 2, 0], &[0, 0, 0]]);
        let mut rng = StdRng::seed_from_u64(0);
        let picks: Vec<_> = (0..4)
            .map(|step| select_move(StrategyKind::Cycle, &open, step, &mut rng).unwrap())
            .collect();
        assert_eq!(picks, Direction::ALL.to_vec());

        let corner = board(&[&[2, 0], &[0, 0]]);
        assert_eq!(
            select_move(StrategyKind::Cycle, &corner, 0, &mut rng),
            Some(Direction::Right)
        );
    }

    #[test]
    fn greedy_prefers_merges() {
        // Left/Right merge the top row; Down only slides one tile
        let b = board(&[&[2, 2], &[4, 0]]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            select_move(StrategyKind::Greedy, &b, 0, &mut rng),
            Some(Direction::Left)
        );
    }
}
