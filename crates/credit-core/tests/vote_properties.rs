use credit_core::{Article, Ballot, VoteDirection, recalculate_score, toggle_vote};
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = VoteDirection> {
    prop_oneof![Just(VoteDirection::Upvote), Just(VoteDirection::Downvote)]
}

fn vote() -> impl Strategy<Value = (String, VoteDirection)> {
    (0u8..8, direction()).prop_map(|(voter, direction)| (format!("voter-{}", voter), direction))
}

fn initial_score() -> impl Strategy<Value = f64> {
    (0u32..=10_000).prop_map(|n| f64::from(n) / 10_000.0)
}

proptest! {
    #[test]
    fn vote_sets_stay_disjoint(initial in initial_score(), votes in prop::collection::vec(vote(), 0..64)) {
        let mut article = Article::new("article", initial).unwrap();
        for (voter, direction) in &votes {
            article.apply_vote(voter, *direction).unwrap();
            let ballot = article.ballot();
            prop_assert_eq!(ballot.upvoters().intersection(ballot.downvoters()).count(), 0);
        }
    }

    #[test]
    fn score_stays_in_bounds(initial in initial_score(), votes in prop::collection::vec(vote(), 0..64)) {
        let mut article = Article::new("article", initial).unwrap();
        for (voter, direction) in &votes {
            article.apply_vote(voter, *direction).unwrap();
            prop_assert!((0.0..=1.0).contains(&article.current_score()));
        }
    }

    #[test]
    fn formula_bounded_for_any_counts(initial in initial_score(), up in 0u64..1_000_000, down in 0u64..1_000_000) {
        let score = recalculate_score(initial, up, down);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn score_is_a_function_of_counts(initial in initial_score(), votes in prop::collection::vec(vote(), 0..64)) {
        let mut article = Article::new("article", initial).unwrap();
        for (voter, direction) in &votes {
            article.apply_vote(voter, *direction).unwrap();
        }
        let ballot = article.ballot();
        prop_assert_eq!(
            article.current_score(),
            recalculate_score(initial, ballot.upvote_count(), ballot.downvote_count())
        );
    }

    #[test]
    fn repeated_click_from_neutral_or_same_side_restores_membership(
        votes in prop::collection::vec(vote(), 0..32),
        (voter, direction) in vote(),
    ) {
        let mut ballot = Ballot::new();
        for (v, d) in &votes {
            ballot = toggle_vote(&ballot, v, *d).0;
        }
        let before = ballot.standing(&voter);
        prop_assume!(before.is_none() || before == Some(direction));

        let (once, _) = toggle_vote(&ballot, &voter, direction);
        let (twice, _) = toggle_vote(&once, &voter, direction);
        prop_assert_eq!(twice, ballot);
    }

    #[test]
    fn no_votes_means_initial_score(initial in initial_score(), votes in prop::collection::vec(vote(), 0..32)) {
        let mut article = Article::new("article", initial).unwrap();
        for (voter, direction) in &votes {
            article.apply_vote(voter, *direction).unwrap();
        }
        // Withdraw whatever is left
        let remaining: Vec<(String, VoteDirection)> = article
            .ballot()
            .votes()
            .map(|(voter, direction)| (voter.to_string(), direction))
            .collect();
        for (voter, direction) in remaining {
            article.apply_vote(&voter, direction).unwrap();
        }

        prop_assert_eq!(article.ballot().total_votes(), 0);
        prop_assert_eq!(article.current_score(), article.initial_score());
    }
}
