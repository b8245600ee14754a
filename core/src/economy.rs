use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Share of the full value paid for a mineral that was never identified.
pub const UNIDENTIFIED_PERCENT: u32 = 30;

pub const ROUND_BASE_SCORE: u32 = 100;
pub const TOOL_BONUS: u32 = 10;
/// Using this many tools or more leaves no efficiency bonus.
pub const BONUS_TOOL_CAP: usize = Tool::ALL.len();
pub const MAX_ROUND_SCORE: u32 = ROUND_BASE_SCORE + TOOL_BONUS * BONUS_TOOL_CAP as u32;

pub const UNIDENTIFIED_LABEL: &str = "??? (unidentified)";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub mineral: Mineral,
    pub identified: bool,
    pub quantity: u32,
}

impl InventoryItem {
    pub fn identified(mineral: Mineral) -> Self {
        Self {
            mineral,
            identified: true,
            quantity: 1,
        }
    }

    pub fn unidentified(mineral: Mineral) -> Self {
        Self {
            mineral,
            identified: false,
            quantity: 1,
        }
    }

    pub fn sell_value(&self) -> u32 {
        sell_value(self)
    }

    pub fn label(&self) -> &str {
        if self.identified {
            &self.mineral.name
        } else {
            UNIDENTIFIED_LABEL
        }
    }
}

/// Floor of 30% of `value`, computed exactly in integers.
pub const fn unidentified_value(value: u32) -> u32 {
    ((value as u64 * UNIDENTIFIED_PERCENT as u64) / 100) as u32
}

pub fn sell_value(item: &InventoryItem) -> u32 {
    if item.identified {
        item.mineral.value
    } else {
        unidentified_value(item.mineral.value)
    }
}

pub fn inventory_value(items: &[InventoryItem]) -> u32 {
    items.iter().fold(0u32, |total, item| {
        total.saturating_add(sell_value(item).saturating_mul(item.quantity))
    })
}

/// Round score: nothing for a miss, otherwise 100 plus 10 per tool left unused.
pub fn tool_shed_score(correct: bool, tools_used: usize) -> u32 {
    if !correct {
        return 0;
    }
    let unused = BONUS_TOOL_CAP.saturating_sub(tools_used) as u32;
    ROUND_BASE_SCORE + unused * TOOL_BONUS
}

pub const fn max_session_score(rounds: u8) -> u32 {
    rounds as u32 * MAX_ROUND_SCORE
}

/// Session total as a percentage of the best possible, rounded to the nearest whole percent.
pub fn efficiency_percent(total: u32, rounds: u8) -> u32 {
    let max = max_session_score(rounds);
    if max == 0 {
        return 0;
    }
    ((total as u64 * 100 + max as u64 / 2) / max as u64) as u32
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub mineral_id: String,
    pub label: String,
    pub rarity: Rarity,
    pub identified: bool,
    pub value: u32,
}

/// Itemised payout shown at the shop counter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub lines: Vec<SaleLine>,
    pub total: u32,
}

impl Receipt {
    pub fn new(items: &[InventoryItem]) -> Self {
        let lines = items
            .iter()
            .map(|item| SaleLine {
                mineral_id: item.mineral.id.clone(),
                label: item.label().into(),
                rarity: item.mineral.rarity,
                identified: item.identified,
                value: sell_value(item).saturating_mul(item.quantity),
            })
            .collect();
        Self {
            lines,
            total: inventory_value(items),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::mineral;
    use alloc::vec;

    #[test]
    fn unidentified_penalty_rounds_down() {
        assert_eq!(sell_value(&InventoryItem::unidentified(mineral("a", "A", 100))), 30);
        assert_eq!(sell_value(&InventoryItem::unidentified(mineral("a", "A", 7))), 2);
        assert_eq!(sell_value(&InventoryItem::unidentified(mineral("a", "A", 1))), 0);
        assert_eq!(sell_value(&InventoryItem::identified(mineral("a", "A", 7))), 7);
    }

    #[test]
    fn inventory_value_sums_quantities() {
        assert_eq!(inventory_value(&[]), 0);

        let mut doubled = InventoryItem::identified(mineral("a", "A", 10));
        doubled.quantity = 2;
        let items = vec![doubled, InventoryItem::unidentified(mineral("b", "B", 50))];

        assert_eq!(inventory_value(&items), 20 + 15);
    }

    #[test]
    fn tool_shed_score_rewards_fewer_tools() {
        assert_eq!(tool_shed_score(true, 0), 160);
        assert_eq!(tool_shed_score(true, 2), 140);
        assert_eq!(tool_shed_score(true, 6), 100);
        assert_eq!(tool_shed_score(true, 9), 100);
        assert_eq!(tool_shed_score(false, 0), 0);
        assert_eq!(MAX_ROUND_SCORE, 160);
    }

    #[test]
    fn session_maximum_and_efficiency() {
        assert_eq!(max_session_score(10), 1600);
        assert_eq!(efficiency_percent(1600, 10), 100);
        assert_eq!(efficiency_percent(800, 10), 50);
        assert_eq!(efficiency_percent(8, 10), 1);
        assert_eq!(efficiency_percent(7, 10), 0);
        assert_eq!(efficiency_percent(5, 0), 0);
    }

    #[test]
    fn receipt_labels_unidentified_lines() {
        let items = vec![
            InventoryItem::identified(mineral("quartz", "Quartz", 10)),
            InventoryItem::unidentified(mineral("gold", "Native Gold", 90)),
        ];
        let receipt = Receipt::new(&items);

        assert_eq!(receipt.lines[0].label, "Quartz");
        assert_eq!(receipt.lines[1].label, UNIDENTIFIED_LABEL);
        assert_eq!(receipt.lines[1].value, 27);
        assert_eq!(receipt.total, 37);
        assert!(Receipt::new(&[]).is_empty());
    }
}
