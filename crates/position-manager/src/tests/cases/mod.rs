mod add_position;
mod approve;
mod decrease;
mod mint;
mod queries;
mod restake;
