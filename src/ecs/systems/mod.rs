pub mod falling;
