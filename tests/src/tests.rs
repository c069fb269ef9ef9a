mod editor;
mod gradient;
mod map;
mod ruler;
