//! Decision-point identity.
//!
//! Snapshots carry no event ids, so "have I already answered this prompt?" is decided by
//! comparing a [`Fingerprint`] built from a fixed subset of snapshot fields. Two snapshots
//! of the same decision point compare equal; any new discard, draw or turn change does not.

use std::fmt;

use crate::types::{DiscardEvent, Phase, PublicState, Seat};

/// Snapshot fields that identify a decision point, in wire names.
pub const FINGERPRINT_FIELDS: [&str; 5] = [
    "phase",
    "turn",
    "wallCount",
    "yourHand.length",
    "discards[last]",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub phase: Phase,
    pub turn: Seat,
    pub wall_count: u32,
    pub hand_len: usize,
    pub last_discard: Option<DiscardEvent>,
}

impl Fingerprint {
    /// The only place a fingerprint is derived from a snapshot.
    pub fn of(state: &PublicState) -> Self {
        Self {
            phase: state.phase,
            turn: state.turn,
            wall_count: state.wall_count,
            hand_len: state.your_hand.len(),
            last_discard: state.last_discard(),
        }
    }

    /// Stable 32-bit key for the JS side, e.g. to key prompt animations.
    pub fn digest(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&[phase_code(self.phase), u8::from(self.turn)]);
        hasher.update(&self.wall_count.to_le_bytes());
        hasher.update(&(self.hand_len as u32).to_le_bytes());
        match self.last_discard {
            Some(d) => {
                hasher.update(&[1, u8::from(d.seat)]);
                hasher.update(d.tile.to_string().as_bytes());
            }
            None => hasher.update(&[0]),
        }
        hasher.finalize()
    }
}

fn phase_code(phase: Phase) -> u8 {
    match phase {
        Phase::Draw => 0,
        Phase::Discard => 1,
        Phase::Claim => 2,
        Phase::End => 3,
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = match self.last_discard {
            Some(d) => format!("{}:{}", u8::from(d.seat), d.tile),
            None => "-".to_string(),
        };
        let values = [
            format!("{:?}", self.phase).to_lowercase(),
            u8::from(self.turn).to_string(),
            self.wall_count.to_string(),
            self.hand_len.to_string(),
            last,
        ];
        for (i, (name, value)) in FINGERPRINT_FIELDS.iter().zip(values).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::{discard, state};

    #[test]
    fn ignores_fields_outside_the_decision_point() {
        let a = state(Phase::Claim, "m1 m2 m3");
        let mut b = a.clone();
        b.message = "someone joined".to_string();
        b.scores = vec![10, -10, 0, 0];
        b.your_hand.reverse();
        b.win_available = true;

        assert_eq!(Fingerprint::of(&a), Fingerprint::of(&b));
        assert_eq!(Fingerprint::of(&a).digest(), Fingerprint::of(&b).digest());
    }

    #[test]
    fn new_discard_changes_fingerprint() {
        let mut a = state(Phase::Claim, "m1 m2 m3");
        a.discards.push(discard(1, "p3"));
        let mut b = a.clone();
        b.discards.push(discard(2, "p3"));

        assert_ne!(Fingerprint::of(&a), Fingerprint::of(&b));
        assert_ne!(Fingerprint::of(&a).digest(), Fingerprint::of(&b).digest());
    }

    #[test]
    fn draw_changes_fingerprint() {
        let a = state(Phase::Discard, "m1 m2 m3");
        let mut b = state(Phase::Discard, "m1 m2 m3 m4");
        b.wall_count -= 1;

        assert_ne!(Fingerprint::of(&a), Fingerprint::of(&b));
    }

    #[test]
    fn display_names_every_field() {
        let mut st = state(Phase::Claim, "m1");
        st.discards.push(discard(3, "z5"));

        assert_eq!(
            Fingerprint::of(&st).to_string(),
            "phase=claim turn=0 wallCount=80 yourHand.length=1 discards[last]=3:z5"
        );
    }
}
