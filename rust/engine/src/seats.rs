use crate::errors::GameError;
use crate::player::{Player, PlayerId};

/// Index of a seat in the ring, `0..capacity`.
pub type SeatIndex = usize;

pub const DEFAULT_SEATS: usize = 6;

/// Fixed-capacity circular sequence of seats.
///
/// Seats are slots in a vector and the ring is index arithmetic modulo the
/// capacity, so traversal order never changes and nothing holds a
/// reference to its neighbour. The capacity is fixed at construction.
#[derive(Debug, Clone)]
pub struct SeatRing {
    seats: Vec<Option<Player>>,
}

impl SeatRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            seats: (0..capacity).map(|_| None).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.seats.len()
    }

    /// The seat after `seat`, wrapping at the end of the ring.
    pub fn next(&self, seat: SeatIndex) -> SeatIndex {
        (seat + 1) % self.capacity()
    }

    /// Every seat index once, starting at `start` and going round.
    pub fn iter_from(&self, start: SeatIndex) -> impl Iterator<Item = SeatIndex> + '_ {
        let n = self.capacity();
        (0..n).map(move |offset| (start + offset) % n)
    }

    pub fn get(&self, seat: SeatIndex) -> Option<&Player> {
        self.seats.get(seat).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, seat: SeatIndex) -> Option<&mut Player> {
        self.seats.get_mut(seat).and_then(Option::as_mut)
    }

    /// Seat holding the player with `id`.
    pub fn find(&self, id: &PlayerId) -> Option<SeatIndex> {
        self.seats
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|p| p.id() == id))
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.find(id).and_then(|seat| self.get(seat))
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        let seat = self.find(id)?;
        self.get_mut(seat)
    }

    /// Seats whose occupant is active, in ring order from `start`.
    pub fn active_from(&self, start: SeatIndex) -> Vec<SeatIndex> {
        self.iter_from(start)
            .filter(|&seat| self.get(seat).is_some_and(Player::is_active))
            .collect()
    }

    /// First seat after `seat` (checking `seat` itself last) whose occupant
    /// satisfies `pred`.
    pub fn next_where<F>(&self, seat: SeatIndex, pred: F) -> Option<SeatIndex>
    where
        F: Fn(&Player) -> bool,
    {
        self.iter_from(self.next(seat))
            .find(|&s| self.get(s).is_some_and(&pred))
    }

    /// Occupied seats in index order.
    pub fn occupied(&self) -> impl Iterator<Item = (SeatIndex, &Player)> + '_ {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(seat, slot)| slot.as_ref().map(|p| (seat, p)))
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> + '_ {
        self.seats.iter_mut().filter_map(Option::as_mut)
    }

    pub fn sit(&mut self, seat: SeatIndex, player: Player) -> Result<(), GameError> {
        let slot = self
            .seats
            .get_mut(seat)
            .ok_or(GameError::InvalidSeat { seat })?;
        if slot.is_some() {
            return Err(GameError::SeatOccupied { seat });
        }
        *slot = Some(player);
        Ok(())
    }

    pub fn vacate(&mut self, seat: SeatIndex) -> Option<Player> {
        self.seats.get_mut(seat).and_then(Option::take)
    }
}

impl Default for SeatRing {
    fn default() -> Self {
        Self::new(DEFAULT_SEATS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_with(seats: &[SeatIndex]) -> SeatRing {
        let mut ring = SeatRing::new(6);
        for &s in seats {
            ring.sit(s, Player::new(format!("p{s}"), format!("P{s}"), 100))
                .unwrap();
        }
        ring
    }

    #[test]
    fn next_wraps_at_capacity() {
        let ring = SeatRing::new(6);
        assert_eq!(ring.next(4), 5);
        assert_eq!(ring.next(5), 0);
    }

    #[test]
    fn next_where_skips_empty_seats_and_checks_start_last() {
        let ring = ring_with(&[1, 4]);
        assert_eq!(ring.next_where(1, |_| true), Some(4));
        assert_eq!(ring.next_where(4, |_| true), Some(1));

        let lone = ring_with(&[2]);
        assert_eq!(lone.next_where(2, |_| true), Some(2));
    }
}
