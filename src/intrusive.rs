//! Shared priority-ordered intrusive list, linked through each task's
//! `link_next` field.
//!
//! A task is a member of at most one such list at a time — the ready
//! list, or one object's wait queue — so both [`crate::ready::Ready`] and
//! [`crate::wait::WaitQueue`] are thin wrappers reusing this one chain
//! implementation rather than duplicating the same insert/remove walk
//! twice with slightly different names.

use crate::task::{Priority, TaskId, TaskTable};

pub struct PrioList {
    head: Option<TaskId>,
}

impl PrioList {
    pub const fn new() -> Self {
        PrioList { head: None }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn peek(&self) -> Option<TaskId> {
        self.head
    }

    /// Insert `id` in descending `effective_prio` order (most urgent —
    /// highest numeric value — first), after any equal-priority entries
    /// already present (FIFO among equals).
    pub fn insert(&mut self, table: &mut TaskTable, id: TaskId) {
        let prio = table.get(id).effective_prio;
        match self.head {
            None => {
                table.get_mut(id).link_next = None;
                self.head = Some(id);
            }
            Some(head) if higher(prio, table.get(head).effective_prio) => {
                table.get_mut(id).link_next = Some(head);
                self.head = Some(id);
            }
            Some(mut cur) => loop {
                let next = table.get(cur).link_next;
                match next {
                    Some(n) if !higher(prio, table.get(n).effective_prio) => cur = n,
                    _ => {
                        table.get_mut(id).link_next = next;
                        table.get_mut(cur).link_next = Some(id);
                        break;
                    }
                }
            },
        }
    }

    /// Remove `id` from wherever it sits in the chain. No-op if absent.
    pub fn remove(&mut self, table: &mut TaskTable, id: TaskId) {
        if self.head == Some(id) {
            self.head = table.get(id).link_next;
            table.get_mut(id).link_next = None;
            return;
        }
        let mut cur = self.head;
        while let Some(c) = cur {
            let next = table.get(c).link_next;
            if next == Some(id) {
                table.get_mut(c).link_next = table.get(id).link_next;
                table.get_mut(id).link_next = None;
                return;
            }
            cur = next;
        }
    }

    pub fn pop_front(&mut self, table: &mut TaskTable) -> Option<TaskId> {
        let id = self.peek()?;
        self.remove(table, id);
        Some(id)
    }
}

impl Default for PrioList {
    fn default() -> Self {
        Self::new()
    }
}

/// spec.md §5: zero is the lowest priority (IDLE); higher numeric values
/// run first.
fn higher(a: Priority, b: Priority) -> bool {
    a > b
}
