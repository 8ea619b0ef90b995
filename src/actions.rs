//! Which action prompts are visible for the current decision point.
//!
//! ```text
//! Hidden ──(new fingerprint, any flag)──▶ Offered ──(pass / kong / pung / chow)──▶ Dismissed(fp)
//!    ▲                                       │  ▲                                     │
//!    └──────(phase back to draw, new fp)─────┼──┼─────────────────────────────────────┘
//!                                            ▼  │ cancel
//!                                       Suppressed (chow picker open)
//! ```
//!
//! Precedence (win > kong > pung > chow) only orders the buttons; the server flags alone
//! decide what is legal.

use serde::Serialize;

use crate::command::Command;
use crate::error::{ClientError, ClientResult};
use crate::fingerprint::Fingerprint;
use crate::tile::Tile;
use crate::types::{ChowPair, Phase, PublicState};

/// Claimable actions in display precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimAction {
    Win,
    Kong,
    Pung,
    Chow,
}

impl ClaimAction {
    pub const PRECEDENCE: [ClaimAction; 4] = [
        ClaimAction::Win,
        ClaimAction::Kong,
        ClaimAction::Pung,
        ClaimAction::Chow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ClaimAction::Win => "win",
            ClaimAction::Kong => "kong",
            ClaimAction::Pung => "pung",
            ClaimAction::Chow => "chow",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::PRECEDENCE.into_iter().find(|a| a.name() == name)
    }
}

/// The four server flags, copied out of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Eligibility {
    pub win: bool,
    pub kong: bool,
    pub pung: bool,
    pub chow: bool,
}

impl Eligibility {
    pub fn of(state: &PublicState) -> Self {
        Self {
            win: state.win_available,
            kong: state.kong_available,
            pung: state.pung_available,
            chow: state.chow_available,
        }
    }

    pub fn allows(self, action: ClaimAction) -> bool {
        match action {
            ClaimAction::Win => self.win,
            ClaimAction::Kong => self.kong,
            ClaimAction::Pung => self.pung,
            ClaimAction::Chow => self.chow,
        }
    }

    pub fn any(self) -> bool {
        self.win || self.kong || self.pung || self.chow
    }

    pub fn in_precedence(self) -> impl Iterator<Item = ClaimAction> {
        ClaimAction::PRECEDENCE
            .into_iter()
            .filter(move |&a| self.allows(a))
    }
}

/// A visible button. `Pass` is present whenever anything is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Prompt {
    Claim(ClaimAction),
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    Hidden,
    Offered {
        fingerprint: Fingerprint,
        eligibility: Eligibility,
    },
}

/// Open combination picker. The decision point it belongs to is kept so a later
/// snapshot for a different decision closes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChowPicker {
    #[serde(skip)]
    pub fingerprint: Fingerprint,
    pub claimed: Option<Tile>,
    pub options: Vec<ChowPair>,
}

/// What selecting an action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Commit(Command),
    PickerOpened,
}

#[derive(Debug, Clone, Default)]
pub struct ActionEngine {
    offer: Option<(Fingerprint, Eligibility)>,
    dismissed: Option<Fingerprint>,
    picker: Option<ChowPicker>,
    chow_options: Vec<ChowPair>,
    claimed: Option<Tile>,
    phase: Option<Phase>,
}

impl ActionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-evaluates against a snapshot. Re-delivering the same snapshot changes nothing.
    pub fn update(&mut self, state: &PublicState) {
        let fingerprint = Fingerprint::of(state);
        let eligibility = Eligibility::of(state);

        if let Some(dismissed) = self.dismissed
            && dismissed != fingerprint
            && state.phase == Phase::Draw
        {
            tracing::debug!(%dismissed, "prompt re-armed");
            self.dismissed = None;
        }

        if self
            .picker
            .as_ref()
            .is_some_and(|picker| picker.fingerprint != fingerprint)
        {
            tracing::debug!("chow picker closed by a new decision point");
            self.picker = None;
        }

        let was_offered = self.offer.is_some();
        self.offer = if eligibility.any() && self.dismissed != Some(fingerprint) {
            Some((fingerprint, eligibility))
        } else {
            None
        };
        if !was_offered && self.offer.is_some() {
            tracing::debug!(%fingerprint, ?eligibility, "prompt offered");
        }

        self.chow_options = state.chow_options.iter().map(|&p| p.into()).collect();
        self.claimed = state.last_discard().map(|d| d.tile);
        self.phase = Some(state.phase);
    }

    pub fn offer(&self) -> Offer {
        match self.offer {
            Some((fingerprint, eligibility)) => Offer::Offered {
                fingerprint,
                eligibility,
            },
            None => Offer::Hidden,
        }
    }

    pub fn dismissed(&self) -> Option<Fingerprint> {
        self.dismissed
    }

    pub fn is_suppressed(&self) -> bool {
        self.picker.is_some()
    }

    pub fn picker(&self) -> Option<&ChowPicker> {
        self.picker.as_ref()
    }

    /// Buttons to draw, actions in precedence order followed by Pass.
    pub fn prompts(&self) -> Vec<Prompt> {
        match (self.offer, self.is_suppressed()) {
            (Some((_, eligibility)), false) => eligibility
                .in_precedence()
                .map(Prompt::Claim)
                .chain(std::iter::once(Prompt::Pass))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Passing in the claim window tells the server; otherwise it only hides the prompt.
    pub fn pass(&mut self) -> ClientResult<Option<Command>> {
        let fingerprint = self.offered_fingerprint("pass")?;
        self.dismiss(fingerprint);
        Ok((self.phase == Some(Phase::Claim)).then_some(Command::PassClaim))
    }

    pub fn choose(&mut self, action: ClaimAction) -> ClientResult<Choice> {
        let (fingerprint, eligibility) = match (self.offer, self.is_suppressed()) {
            (Some(offer), false) => offer,
            _ => {
                return Err(ClientError::ActionNotOffered {
                    action: action.name().to_string(),
                });
            }
        };
        if !eligibility.allows(action) {
            return Err(ClientError::ActionNotOffered {
                action: action.name().to_string(),
            });
        }

        let command = match action {
            ClaimAction::Win => {
                // Winning ends the round, so the decision point never needs dismissing.
                self.offer = None;
                return Ok(Choice::Commit(Command::DeclareWin));
            }
            ClaimAction::Kong => Command::DeclareKong,
            ClaimAction::Pung => Command::DeclarePung,
            ClaimAction::Chow if self.chow_options.len() > 1 => {
                tracing::debug!(options = self.chow_options.len(), "chow picker opened");
                self.picker = Some(ChowPicker {
                    fingerprint,
                    claimed: self.claimed,
                    options: self.chow_options.clone(),
                });
                return Ok(Choice::PickerOpened);
            }
            ClaimAction::Chow => Command::DeclareChow {
                choice: self.chow_options.first().copied(),
            },
        };
        self.dismiss(fingerprint);
        Ok(Choice::Commit(command))
    }

    pub fn pick_chow(&mut self, index: usize) -> ClientResult<Command> {
        let picker = self.picker.as_ref().ok_or(ClientError::PickerClosed)?;
        let choice = *picker
            .options
            .get(index)
            .ok_or(ClientError::NoSuchChowOption { index })?;
        let fingerprint = picker.fingerprint;
        self.picker = None;
        self.dismiss(fingerprint);
        Ok(Command::DeclareChow {
            choice: Some(choice),
        })
    }

    /// Closes the picker and shows the same offer again. The dismissed value is untouched.
    pub fn cancel_chow(&mut self) -> ClientResult<()> {
        if self.picker.take().is_none() {
            return Err(ClientError::PickerClosed);
        }
        tracing::debug!("chow picker cancelled");
        Ok(())
    }

    fn offered_fingerprint(&self, action: &str) -> ClientResult<Fingerprint> {
        match (self.offer, self.is_suppressed()) {
            (Some((fingerprint, _)), false) => Ok(fingerprint),
            _ => Err(ClientError::ActionNotOffered {
                action: action.to_string(),
            }),
        }
    }

    fn dismiss(&mut self, fingerprint: Fingerprint) {
        tracing::debug!(%fingerprint, "prompt dismissed");
        self.dismissed = Some(fingerprint);
        self.offer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::parse_tiles;
    use crate::types::Seat;
    use crate::types::fixtures::{discard, state};

    fn claim_state() -> PublicState {
        let mut st = state(Phase::Claim, "m1 m2 p1 p2 p4");
        st.turn = Seat::SOUTH;
        st.discards.push(discard(3, "p3"));
        st
    }

    fn chow_options(st: &mut PublicState, pairs: &[&str]) {
        st.chow_available = true;
        st.chow_options = pairs
            .iter()
            .map(|p| {
                let tiles = parse_tiles(p).unwrap();
                [tiles[0], tiles[1]]
            })
            .collect();
    }

    #[test]
    fn nothing_offered_without_flags() {
        let mut engine = ActionEngine::new();
        engine.update(&claim_state());

        assert_eq!(engine.offer(), Offer::Hidden);
        assert!(engine.prompts().is_empty());
    }

    #[test]
    fn prompts_follow_precedence_and_end_with_pass() {
        let mut st = claim_state();
        st.chow_available = true;
        st.pung_available = true;
        st.win_available = true;
        let mut engine = ActionEngine::new();
        engine.update(&st);

        assert_eq!(
            engine.prompts(),
            vec![
                Prompt::Claim(ClaimAction::Win),
                Prompt::Claim(ClaimAction::Pung),
                Prompt::Claim(ClaimAction::Chow),
                Prompt::Pass,
            ]
        );
    }

    #[test]
    fn pass_suppresses_redelivery_of_same_decision() {
        let mut st = claim_state();
        st.pung_available = true;
        let mut engine = ActionEngine::new();
        engine.update(&st);

        assert_eq!(engine.pass().unwrap(), Some(Command::PassClaim));
        engine.update(&st);
        engine.update(&st);

        assert!(engine.prompts().is_empty());
        assert_eq!(engine.dismissed(), Some(Fingerprint::of(&st)));
    }

    #[test]
    fn new_decision_point_offers_again() {
        let mut st = claim_state();
        st.pung_available = true;
        let mut engine = ActionEngine::new();
        engine.update(&st);
        engine.pass().unwrap();

        st.discards.push(discard(0, "s9"));
        engine.update(&st);

        assert!(matches!(engine.offer(), Offer::Offered { .. }));
    }

    #[test]
    fn dismissal_is_cleared_when_play_returns_to_draw() {
        let mut st = claim_state();
        st.pung_available = true;
        let mut engine = ActionEngine::new();
        engine.update(&st);
        engine.pass().unwrap();

        let mut next = st.clone();
        next.phase = Phase::Draw;
        next.pung_available = false;
        engine.update(&next);

        assert_eq!(engine.dismissed(), None);
    }

    #[test]
    fn pass_outside_claim_window_only_hides() {
        let mut st = state(Phase::Discard, "m1 m1 m1 m2 m2");
        st.win_available = true;
        let mut engine = ActionEngine::new();
        engine.update(&st);

        assert_eq!(engine.pass().unwrap(), None);
        assert!(engine.prompts().is_empty());
    }

    #[test]
    fn win_commits_without_dismissing() {
        let mut st = claim_state();
        st.win_available = true;
        let mut engine = ActionEngine::new();
        engine.update(&st);

        assert_eq!(
            engine.choose(ClaimAction::Win).unwrap(),
            Choice::Commit(Command::DeclareWin)
        );
        assert_eq!(engine.dismissed(), None);
    }

    #[test]
    fn pung_commits_and_dismisses() {
        let mut st = claim_state();
        st.pung_available = true;
        let mut engine = ActionEngine::new();
        engine.update(&st);

        assert_eq!(
            engine.choose(ClaimAction::Pung).unwrap(),
            Choice::Commit(Command::DeclarePung)
        );
        assert_eq!(engine.dismissed(), Some(Fingerprint::of(&st)));
    }

    #[test]
    fn ineligible_action_is_rejected() {
        let mut st = claim_state();
        st.pung_available = true;
        let mut engine = ActionEngine::new();
        engine.update(&st);

        assert!(matches!(
            engine.choose(ClaimAction::Kong),
            Err(ClientError::ActionNotOffered { .. })
        ));
    }

    #[test]
    fn single_chow_option_commits_directly() {
        let mut st = claim_state();
        chow_options(&mut st, &["p1 p2"]);
        let mut engine = ActionEngine::new();
        engine.update(&st);

        let Choice::Commit(Command::DeclareChow { choice }) =
            engine.choose(ClaimAction::Chow).unwrap()
        else {
            panic!("expected a chow commit");
        };
        assert_eq!(choice.unwrap().a.to_string(), "p1");
    }

    #[test]
    fn chow_picker_suppresses_then_picks() {
        let mut st = claim_state();
        chow_options(&mut st, &["p1 p2", "p2 p4"]);
        let mut engine = ActionEngine::new();
        engine.update(&st);

        assert_eq!(
            engine.choose(ClaimAction::Chow).unwrap(),
            Choice::PickerOpened
        );
        assert!(engine.is_suppressed());
        assert!(engine.prompts().is_empty());
        assert_eq!(engine.picker().unwrap().claimed.unwrap().to_string(), "p3");

        let command = engine.pick_chow(1).unwrap();
        assert_eq!(
            command,
            Command::DeclareChow {
                choice: Some(ChowPair {
                    a: "p2".parse().unwrap(),
                    b: "p4".parse().unwrap(),
                }),
            }
        );
        assert!(!engine.is_suppressed());
        assert_eq!(engine.dismissed(), Some(Fingerprint::of(&st)));
    }

    #[test]
    fn chow_cancel_restores_offer_without_touching_dismissed() {
        let mut st = claim_state();
        chow_options(&mut st, &["p1 p2", "p2 p4"]);
        let mut engine = ActionEngine::new();
        engine.update(&st);
        let before = engine.dismissed();

        engine.choose(ClaimAction::Chow).unwrap();
        engine.cancel_chow().unwrap();

        assert_eq!(engine.dismissed(), before);
        assert_eq!(
            engine.prompts(),
            vec![Prompt::Claim(ClaimAction::Chow), Prompt::Pass]
        );
        engine.update(&st);
        assert!(matches!(engine.offer(), Offer::Offered { .. }));
    }

    #[test]
    fn picker_closes_when_decision_moves_on() {
        let mut st = claim_state();
        chow_options(&mut st, &["p1 p2", "p2 p4"]);
        let mut engine = ActionEngine::new();
        engine.update(&st);
        engine.choose(ClaimAction::Chow).unwrap();

        st.discards.push(discard(2, "m9"));
        engine.update(&st);

        assert!(!engine.is_suppressed());
        assert!(matches!(engine.pick_chow(0), Err(ClientError::PickerClosed)));
    }

    #[test]
    fn pick_out_of_range_keeps_picker_open() {
        let mut st = claim_state();
        chow_options(&mut st, &["p1 p2", "p2 p4"]);
        let mut engine = ActionEngine::new();
        engine.update(&st);
        engine.choose(ClaimAction::Chow).unwrap();

        assert!(matches!(
            engine.pick_chow(5),
            Err(ClientError::NoSuchChowOption { index: 5 })
        ));
        assert!(engine.is_suppressed());
    }
}
