pub mod data;
pub mod game;
pub mod keyboard;
pub mod prelude;
pub mod score;
pub mod select;

pub use data::{Data, LoadDataErr, DATA};
pub use game::{Game, GuessErr, GAME_STATE_KEY};
pub use keyboard::{KeyStatus, KeyboardState};
pub use prelude::{NUM_TURNS, WORD_SIZE};
pub use score::{Coloring, Colorings};
pub use select::{
    DaySelection, SelectErr, SelectionPolicy, WordSelector, SELECTION_STATE_KEY,
};
