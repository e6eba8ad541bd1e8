use serde::{Deserialize, Serialize};

use crate::engine::xp_to_level;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    pub name: String,
    pub xp: u64,
    pub club: String,
}

impl Friend {
    fn new(name: &str, xp: u64, club: &str) -> Self {
        Self {
            name: name.to_string(),
            xp,
            club: club.to_string(),
        }
    }
}

pub fn default_friends() -> Vec<Friend> {
    vec![
        Friend::new("Emma", 1740, "Aigles de Lyon"),
        Friend::new("Lucas", 1310, "Aigles de Lyon"),
        Friend::new("Yanis", 980, "Volants 93"),
        Friend::new("Sarah", 1650, "Aigles de Lyon"),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    pub rank: usize,
    pub name: String,
    pub club: String,
    pub xp: u64,
    pub level: u32,
    pub is_you: bool,
}

/// Friends plus the player, highest XP first. Ties keep input order with the
/// player after the friends.
pub fn rank_players(friends: &[Friend], name: &str, club: &str, xp: u64) -> Vec<RankEntry> {
    let mut players: Vec<(&str, &str, u64, bool)> = friends
        .iter()
        .map(|f| (f.name.as_str(), f.club.as_str(), f.xp, false))
        .collect();
    players.push((name, club, xp, true));
    players.sort_by(|a, b| b.2.cmp(&a.2));

    players
        .into_iter()
        .enumerate()
        .map(|(i, (name, club, xp, is_you))| RankEntry {
            rank: i + 1,
            name: name.to_string(),
            club: club.to_string(),
            xp,
            level: xp_to_level(xp).level,
            is_you,
        })
        .collect()
}

pub fn club_board(ranking: &[RankEntry], club: &str) -> Vec<RankEntry> {
    ranking
        .iter()
        .filter(|e| e.club == club)
        .enumerate()
        .map(|(i, e)| RankEntry {
            rank: i + 1,
            ..e.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_is_ranked_among_friends() {
        let ranking = rank_players(&default_friends(), "Alex", "Aigles de Lyon", 1500);
        let names: Vec<&str> = ranking.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Emma", "Sarah", "Alex", "Lucas", "Yanis"]);
        assert_eq!(ranking[2].rank, 3);
        assert!(ranking[2].is_you);
        assert_eq!(ranking[4].level, 7);
    }

    #[test]
    fn test_tie_puts_player_after_friend() {
        let ranking = rank_players(&default_friends(), "Alex", "Volants 93", 980);
        assert_eq!(ranking[3].name, "Yanis");
        assert_eq!(ranking[4].name, "Alex");
    }

    #[test]
    fn test_club_board_reranks() {
        let ranking = rank_players(&default_friends(), "Alex", "Volants 93", 100);
        let club = club_board(&ranking, "Volants 93");
        assert_eq!(club.len(), 2);
        assert_eq!((club[0].rank, club[0].name.as_str()), (1, "Yanis"));
        assert_eq!((club[1].rank, club[1].name.as_str()), (2, "Alex"));
    }
}
