use holdem_engine::errors::GameError;
use holdem_engine::player::{Player, PlayerId};
use holdem_engine::seats::{SeatRing, DEFAULT_SEATS};

fn seated(seats: &[usize]) -> SeatRing {
    let mut ring = SeatRing::new(DEFAULT_SEATS);
    for &s in seats {
        ring.sit(s, Player::new(format!("p{s}"), format!("Player {s}"), 100))
            .unwrap();
    }
    ring
}

#[test]
fn traversal_visits_every_seat_once_from_any_start() {
    let ring = SeatRing::new(4);
    let order: Vec<usize> = ring.iter_from(2).collect();
    assert_eq!(order, vec![2, 3, 0, 1]);
    assert_eq!(ring.next(3), 0);
}

#[test]
fn active_seats_listed_in_ring_order() {
    let ring = seated(&[0, 2, 5]);
    assert_eq!(ring.active_from(3), vec![5, 0, 2]);
    assert_eq!(ring.active_from(0), vec![0, 2, 5]);
}

#[test]
fn lookup_by_player_id() {
    let ring = seated(&[1, 4]);
    assert_eq!(ring.find(&PlayerId::from("p4")), Some(4));
    assert_eq!(ring.find(&PlayerId::from("p3")), None);
    assert_eq!(ring.player(&PlayerId::from("p1")).unwrap().name(), "Player 1");
}

#[test]
fn sitting_checks_the_seat() {
    let mut ring = seated(&[1]);
    assert_eq!(
        ring.sit(1, Player::new("x", "X", 10)),
        Err(GameError::SeatOccupied { seat: 1 })
    );
    assert_eq!(
        ring.sit(DEFAULT_SEATS, Player::new("x", "X", 10)),
        Err(GameError::InvalidSeat { seat: DEFAULT_SEATS })
    );

    let left = ring.vacate(1).unwrap();
    assert_eq!(left.id(), &PlayerId::from("p1"));
    assert!(ring.get(1).is_none());
    assert_eq!(ring.occupied().count(), 0);
}
