//! Endpoint paths of the board service, relative to the configured base URL.

pub const REGISTER: &str = "/api/auth/register";
pub const LOGIN: &str = "/api/auth/login";
pub const REFRESH: &str = "/api/auth/refresh";
pub const ME: &str = "/api/auth/me";

pub const BOARDS: &str = "/api/boards";
const LISTS: &str = "/api/lists";
const CARDS: &str = "/api/cards";

pub fn board(board_id: &str) -> String {
    format!("{}/{}", BOARDS, board_id)
}

/// Lists of a board (GET, POST)
pub fn board_lists(board_id: &str) -> String {
    format!("{}/{}", LISTS, board_id)
}

/// One list (PUT, DELETE)
pub fn list(list_id: &str) -> String {
    format!("{}/{}", LISTS, list_id)
}

pub fn reorder_lists(board_id: &str) -> String {
    format!("{}/{}/reorder", LISTS, board_id)
}

/// Cards of a list (POST)
pub fn list_cards(list_id: &str) -> String {
    format!("{}/{}", CARDS, list_id)
}

/// One card (PUT, DELETE)
pub fn card(card_id: &str) -> String {
    format!("{}/{}", CARDS, card_id)
}

pub fn move_card(card_id: &str) -> String {
    format!("{}/{}/move", CARDS, card_id)
}

pub fn reorder_cards(list_id: &str) -> String {
    format!("{}/{}/reorder", CARDS, list_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(board("b1"), "/api/boards/b1");
        assert_eq!(reorder_lists("b1"), "/api/lists/b1/reorder");
        assert_eq!(move_card("c1"), "/api/cards/c1/move");
        assert_eq!(reorder_cards("l1"), "/api/cards/l1/reorder");
    }
}
