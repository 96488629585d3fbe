//! The daily winner calculation.
//!
//! Pure functions over a three-day window of menus. No persistence or
//! cache dependency, so the rotation rule is testable in isolation.

use std::collections::HashSet;

use uuid::Uuid;

use crate::storage::DayWindow;

use super::types::Menu;

/// Computes today's winning menus from the menus of the window's three days.
///
/// A restaurant that achieved (or tied for) the highest vote count on both
/// of the two preceding days is excluded from winning today. Among the
/// remaining menus of today, every menu tied for the highest vote count is
/// returned; ties are never broken arbitrarily. An empty candidate set
/// yields an empty result.
pub fn daily_winners<'a>(menus: &'a [Menu], window: &DayWindow) -> Vec<&'a Menu> {
    let mut today = Vec::new();
    let mut yesterday = Vec::new();
    let mut day_before = Vec::new();

    for menu in menus {
        if menu.day == window.today() {
            today.push(menu);
        } else if menu.day == window.yesterday() {
            yesterday.push(menu);
        } else if menu.day == window.day_before_yesterday() {
            day_before.push(menu);
        }
        // Menus outside the window carry no weight.
    }

    let excluded: HashSet<Uuid> = leading_restaurants(&yesterday)
        .intersection(&leading_restaurants(&day_before))
        .copied()
        .collect();

    top_menus(today, &excluded)
}

/// Returns the restaurants holding the highest vote count in a day bucket.
///
/// Ties all count: a restaurant that merely tied for first place still
/// "won" that day for exclusion purposes.
fn leading_restaurants(menus: &[&Menu]) -> HashSet<Uuid> {
    let mut max: Option<u32> = None;
    let mut leaders = HashSet::new();

    for menu in menus {
        match max {
            Some(current) if menu.vote_count < current => {}
            Some(current) if menu.vote_count == current => {
                leaders.insert(menu.restaurant_id);
            }
            _ => {
                max = Some(menu.vote_count);
                leaders.clear();
                leaders.insert(menu.restaurant_id);
            }
        }
    }

    leaders
}

/// Returns every non-excluded menu tied for the highest vote count.
///
/// The maximum is taken as-is, so a zero-vote menu wins when nothing beats
/// it.
fn top_menus<'a>(candidates: Vec<&'a Menu>, excluded: &HashSet<Uuid>) -> Vec<&'a Menu> {
    let mut max: Option<u32> = None;
    let mut winners: Vec<&Menu> = Vec::new();

    for menu in candidates {
        if excluded.contains(&menu.restaurant_id) {
            continue;
        }
        match max {
            Some(current) if menu.vote_count < current => {}
            Some(current) if menu.vote_count == current => winners.push(menu),
            _ => {
                max = Some(menu.vote_count);
                winners.clear();
                winners.push(menu);
            }
        }
    }

    winners
}
