//! Maenads: at the end of the turn, an opponent worker flanked on
//! opposite sides by two of your workers makes its owner lose.

use crate::board::Location;
use crate::hooks::{HookCtx, WinArg};
use crate::powers::{PowerCapability, PowerId};

/// One direction per axis; the opposite side is its negation.
const AXES: [(i8, i8); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

#[derive(Clone, Copy, Debug, Default)]
pub struct Maenads;

impl PowerCapability for Maenads {
    fn id(&self) -> PowerId {
        PowerId::Maenads
    }

    fn check_player_winning(&self, ctx: &HookCtx<'_>, arg: &mut WinArg) {
        if !arg.end_of_turn {
            return;
        }
        let board = ctx.board();
        let mine = |x: u8, y: u8| {
            board
                .worker_at(x, y)
                .is_some_and(|w| !ctx.is_opponent_piece(w) && w.owner.is_some())
        };
        let order = ctx.order();
        for victim in board.placed_pieces() {
            if !victim.is_worker() || victim.location != Location::Board || !ctx.is_opponent_piece(victim) {
                continue;
            }
            let (Some(at), Some(owner)) = (victim.space, victim.owner) else {
                continue;
            };
            let flanked = AXES.iter().any(|&(dx, dy)| {
                let a = at.offset(dx, dy).is_some_and(|(x, y)| mine(x, y));
                let b = at.offset(-dx, -dy).is_some_and(|(x, y)| mine(x, y));
                a && b
            });
            if flanked {
                for loser in order.teammates(owner) {
                    if !order.is_eliminated(loser) {
                        arg.add_loser(loser);
                    }
                }
            }
        }
    }
}
