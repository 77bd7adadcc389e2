pub mod d100_home;
