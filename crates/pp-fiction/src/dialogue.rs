//! Conversation cursors over static NPC dialogue trees.

use pp_core::catalog::{DialogueNode, Npc, ResponseOption};

use crate::error::{FictionError, FictionResult};

/// Position in an NPC's dialogue tree. The tree itself is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    /// NPC being talked to.
    pub npc_id: String,
    /// Node whose responses are on offer.
    pub node_id: String,
}

/// What picking a response leads to.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<'a> {
    /// The NPC answers with another node.
    Continue {
        /// The picked response.
        response: &'a ResponseOption,
        /// The node the NPC answers with.
        node: &'a DialogueNode,
        /// The cursor afterwards; `None` if that node offers no responses.
        next: Option<Conversation>,
    },
    /// The conversation is over.
    End {
        /// The picked response.
        response: &'a ResponseOption,
    },
}

impl Conversation {
    /// Open a conversation at the NPC's initial node.
    pub fn start(npc: &Npc) -> Self {
        Self {
            npc_id: npc.id.clone(),
            node_id: npc.initial_dialogue.clone(),
        }
    }

    /// The node the cursor points at.
    pub fn node<'a>(&self, npc: &'a Npc) -> Option<&'a DialogueNode> {
        npc.node(&self.node_id)
    }

    /// Pick a response by id or 1-based number.
    pub fn choose<'a>(&self, npc: &'a Npc, key: &str) -> FictionResult<Reply<'a>> {
        let node = self.node(npc).ok_or(FictionError::NoConversation)?;
        let response = node
            .response(key)
            .ok_or_else(|| FictionError::InvalidResponse(key.to_string()))?;

        let Some(next_node) = response.next.as_deref().and_then(|id| npc.node(id)) else {
            return Ok(Reply::End { response });
        };

        let next = (!next_node.is_terminal()).then(|| Self {
            npc_id: self.npc_id.clone(),
            node_id: next_node.id.clone(),
        });
        Ok(Reply::Continue {
            response,
            node: next_node,
            next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pp_core::Catalog;

    fn guido(catalog: &Catalog) -> &Npc {
        catalog
            .location("starting_area")
            .and_then(|l| l.npc("instructor_guido"))
            .unwrap()
    }

    #[test]
    fn starts_at_initial_node() {
        let catalog = Catalog::builtin().unwrap();
        let npc = guido(&catalog);
        let conv = Conversation::start(npc);
        assert_eq!(conv.node_id, "greeting");
        assert_eq!(conv.node(npc).unwrap().responses.len(), 2);
    }

    #[test]
    fn reply_advances_cursor() {
        let catalog = Catalog::builtin().unwrap();
        let npc = guido(&catalog);
        let conv = Conversation::start(npc);
        match conv.choose(npc, "ready").unwrap() {
            Reply::Continue {
                response,
                node,
                next,
            } => {
                assert_eq!(response.text, "Yes, I'm ready to learn!");
                assert_eq!(node.id, "explain_journey");
                assert_eq!(next.unwrap().node_id, "explain_journey");
            }
            other => panic!("expected continue, got {other:?}"),
        }
    }

    #[test]
    fn numbered_reply() {
        let catalog = Catalog::builtin().unwrap();
        let npc = guido(&catalog);
        let conv = Conversation::start(npc);
        let reply = conv.choose(npc, "2").unwrap();
        assert!(matches!(reply, Reply::Continue { node, .. } if node.id == "explanation"));
    }

    #[test]
    fn terminal_node_closes_conversation() {
        let catalog = Catalog::builtin().unwrap();
        let npc = guido(&catalog);
        let conv = Conversation {
            npc_id: npc.id.clone(),
            node_id: "explain_journey".into(),
        };
        match conv.choose(npc, "thanks").unwrap() {
            Reply::Continue { node, next, .. } => {
                assert_eq!(node.id, "parting");
                assert!(next.is_none());
            }
            other => panic!("expected continue, got {other:?}"),
        }
    }

    #[test]
    fn unknown_response_is_error() {
        let catalog = Catalog::builtin().unwrap();
        let npc = guido(&catalog);
        let conv = Conversation::start(npc);
        assert_eq!(
            conv.choose(npc, "7"),
            Err(FictionError::InvalidResponse("7".into()))
        );
    }
}
