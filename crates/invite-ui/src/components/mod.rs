pub mod game_card;
pub mod invite_screen;
pub mod social_meta;
