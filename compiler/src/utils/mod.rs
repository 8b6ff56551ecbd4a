mod snake;

pub use snake::to_column_name;
