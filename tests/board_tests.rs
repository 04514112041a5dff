//! Board construction properties.

use std::collections::HashMap;

use pairs::game::{CardStatus, ImageRef, build_board};
use pairs::GameError;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn pool(size: usize) -> Vec<ImageRef> {
    (0..size).map(|i| ImageRef::new(format!("photo-{i}.jpg"))).collect()
}

proptest! {
    #[test]
    fn every_identity_appears_twice(pairs in 1usize..24, extra in 0usize..8, seed in any::<u64>()) {
        let images = pool(pairs + extra);
        let mut rng = StdRng::seed_from_u64(seed);
        let board = build_board(&images, pairs, &mut rng).unwrap();

        prop_assert_eq!(board.len(), pairs * 2);
        let mut counts: HashMap<ImageRef, usize> = HashMap::new();
        for card in &board {
            *counts.entry(card.identity.clone()).or_default() += 1;
            prop_assert_eq!(card.status, CardStatus::Hidden);
        }
        prop_assert_eq!(counts.len(), pairs);
        prop_assert!(counts.values().all(|&c| c == 2));
        prop_assert!(counts.keys().all(|k| images[..pairs].contains(k)));
    }

    #[test]
    fn short_pool_shrinks_the_board(available in 1usize..10, requested in 1usize..20, seed in any::<u64>()) {
        let images = pool(available);
        let mut rng = StdRng::seed_from_u64(seed);
        let board = build_board(&images, requested, &mut rng).unwrap();
        prop_assert_eq!(board.len(), 2 * available.min(requested));
    }
}

#[test]
fn empty_pool_fails() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        build_board(&[], 3, &mut rng),
        Err(GameError::NoImagesSelected)
    ));
}

/// Shuffles should not keep the duplicated input order across many draws.
#[test]
fn order_is_randomized() {
    let images = pool(6);
    let unshuffled: Vec<ImageRef> = images
        .iter()
        .flat_map(|img| [img.clone(), img.clone()])
        .collect();
    let mut rng = StdRng::seed_from_u64(2024);

    let mut in_order = 0;
    let mut first_positions: HashMap<ImageRef, usize> = HashMap::new();
    for _ in 0..500 {
        let board = build_board(&images, 6, &mut rng).unwrap();
        let order: Vec<ImageRef> = board.iter().map(|c| c.identity.clone()).collect();
        if order == unshuffled {
            in_order += 1;
        }
        *first_positions.entry(order[0].clone()).or_default() += 1;
    }

    assert!(in_order < 5);
    // Each identity should lead the board at least sometimes.
    assert_eq!(first_positions.len(), 6);
}

#[test]
fn same_seed_same_board() {
    let images = pool(8);
    let a = build_board(&images, 8, &mut StdRng::seed_from_u64(99)).unwrap();
    let b = build_board(&images, 8, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
}
