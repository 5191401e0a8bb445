#[cfg(test)]
pub mod common;

#[cfg(test)]
mod test_turn_order;




#[cfg(test)]
mod test_exhaustion;

#[cfg(test)]
mod test_items;
