//! Round generation
//!
//! Pure functions of sanitized settings and an injected RNG.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::round::{Item, ItemIds, Payload, Round, Target};
use super::scatter::{ScatterConfig, scatter};
use crate::clamp_round;
use crate::consts::RABBIT_CARROTS;
use crate::settings::{
    DEFAULT_WORDS, ExerciseSettings, FeedRabbitSettings, FeedingSettings,
    LetterFindSettings, LetterSoundSettings, NumberMatchSettings, WordRecomposeSettings,
};

/// Quantities offered in a number-match round
const QUANTITY_CHOICES: [u32; 3] = [1, 2, 3];

/// Build the next round for any exercise
pub fn generate_round(
    settings: &ExerciseSettings,
    round_id: u32,
    ids: &mut ItemIds,
    rng: &mut impl Rng,
) -> Round {
    match settings {
        ExerciseSettings::LetterFind(s) => letter_find_round(s, round_id, ids, rng),
        ExerciseSettings::LetterSound(s) => letter_sound_round(s, round_id, ids, rng),
        ExerciseSettings::WordRecompose(s) => word_round(s, round_id, ids, rng),
        ExerciseSettings::NumberMatch(s) => number_match_round(s, round_id, ids, rng),
        ExerciseSettings::FeedRabbit(s) => feed_rabbit_round(s, round_id, ids, rng),
        ExerciseSettings::Feeding(s) => feeding_round(s, round_id, ids, rng),
    }
}

/// Number of target cards among `count`.
///
/// With fewer than two cards the ratio cannot hold, so the single card is
/// the target.
pub fn target_count(count: u32, ratio: f64) -> u32 {
    if count < 2 {
        return 1;
    }
    clamp_round(count as f64 * ratio, 1, count as i64 - 1) as u32
}

/// Shuffled `(letter, is_target)` list. Distractors are drawn with
/// replacement; an empty pool yields targets only.
pub fn compose_find_items(
    target: char,
    count: u32,
    ratio: f64,
    pool: &[char],
    rng: &mut impl Rng,
) -> Vec<(char, bool)> {
    let count = count.max(1);
    let targets = if pool.is_empty() {
        count
    } else {
        target_count(count, ratio)
    };

    let mut letters: Vec<(char, bool)> = Vec::with_capacity(count as usize);
    letters.extend((0..targets).map(|_| (target, true)));
    for _ in targets..count {
        if let Some(&letter) = pool.choose(rng) {
            letters.push((letter, false));
        }
    }
    letters.shuffle(rng);
    letters
}

fn letter_find_round(
    settings: &LetterFindSettings,
    round_id: u32,
    ids: &mut ItemIds,
    rng: &mut impl Rng,
) -> Round {
    let letters = compose_find_items(
        settings.target_letter,
        settings.items_count,
        settings.target_ratio,
        &settings.distractor_pool(),
        rng,
    );
    let placement = scatter(letters.len(), &ScatterConfig::for_count(letters.len()), rng);

    let items = letters
        .into_iter()
        .zip(placement.points)
        .map(|((letter, is_target), position)| Item {
            position: Some(position),
            ..Item::new(ids.next_item_id(), Payload::Letter(letter), is_target)
        })
        .collect();

    Round::new(round_id, Target::Letter(settings.target_letter), items)
}

fn letter_sound_round(
    settings: &LetterSoundSettings,
    round_id: u32,
    ids: &mut ItemIds,
    rng: &mut impl Rng,
) -> Round {
    let letters = settings.effective_letters();
    let target = letters.choose(rng).copied().unwrap_or('A');
    let choices = (settings.choices_per_round as usize).min(letters.len()).max(1);

    let mut others: Vec<char> = letters.into_iter().filter(|&c| c != target).collect();
    others.shuffle(rng);
    others.truncate(choices - 1);
    others.push(target);
    others.shuffle(rng);

    let items = others
        .into_iter()
        .map(|letter| Item::new(ids.next_item_id(), Payload::Letter(letter), letter == target))
        .collect();

    Round::new(round_id, Target::Letter(target), items)
}

fn word_round(
    settings: &WordRecomposeSettings,
    round_id: u32,
    ids: &mut ItemIds,
    rng: &mut impl Rng,
) -> Round {
    let word = settings
        .words
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| DEFAULT_WORDS[0].to_string());

    let mut pool: Vec<char> = word.chars().collect();
    pool.shuffle(rng);

    let items = pool
        .into_iter()
        .map(|letter| Item::new(ids.next_item_id(), Payload::Letter(letter), true))
        .collect();

    let mut round = Round::new(round_id, Target::Word(word.clone()), items);
    round.slots = vec![None; word.chars().count()];
    round
}

fn number_match_round(
    settings: &NumberMatchSettings,
    round_id: u32,
    ids: &mut ItemIds,
    rng: &mut impl Rng,
) -> Round {
    let target = settings.enabled_numbers.choose(rng).copied().unwrap_or(1);

    let mut choices = QUANTITY_CHOICES;
    choices.shuffle(rng);

    let items = choices
        .into_iter()
        .map(|n| Item::new(ids.next_item_id(), Payload::Number(n), n == target))
        .collect();

    Round::new(round_id, Target::Count(target), items)
}

fn feed_rabbit_round(
    settings: &FeedRabbitSettings,
    round_id: u32,
    ids: &mut ItemIds,
    rng: &mut impl Rng,
) -> Round {
    let target = settings.enabled_numbers.choose(rng).copied().unwrap_or(1);
    let carrots = carrots(RABBIT_CARROTS, ids);
    Round::new(round_id, Target::Count(target), carrots)
}

fn feeding_round(
    settings: &FeedingSettings,
    round_id: u32,
    ids: &mut ItemIds,
    rng: &mut impl Rng,
) -> Round {
    let target = rng.random_range(1..=settings.max_target.max(1));
    let carrots = carrots(settings.pool_size as usize, ids);
    Round::new(round_id, Target::Count(target), carrots)
}

fn carrots(n: usize, ids: &mut ItemIds) -> Vec<Item> {
    (0..n)
        .map(|_| Item::new(ids.next_item_id(), Payload::Carrot, false))
        .collect()
}
