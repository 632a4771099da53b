use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::collections::HashSet;

/// A parent link between two commits
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Edge {
    pub child: ObjectId,
    pub parent: ObjectId,
}

#[derive(Debug)]
struct Frame {
    oid: ObjectId,
    parents: Vec<ObjectId>,
    next: usize,
}

/// Depth-first walk over the parent edges reachable from a commit
///
/// Edges come out in the order a recursive walk would print them: a commit's first parent
/// edge, then everything below that parent, then its second parent edge. The walk stops
/// after the first error.
pub struct History<'d> {
    database: &'d Database,
    start: Option<ObjectId>,
    stack: Vec<Frame>,
    visited: HashSet<ObjectId>,
}

impl<'d> History<'d> {
    pub fn new(database: &'d Database, start: ObjectId) -> Self {
        History {
            database,
            start: Some(start),
            stack: Vec::new(),
            visited: HashSet::new(),
        }
    }

    fn expand(&mut self, oid: ObjectId) -> anyhow::Result<()> {
        let parents = self.database.load_as::<Commit>(&oid)?.parents()?;
        self.stack.push(Frame {
            oid,
            parents,
            next: 0,
        });

        Ok(())
    }

    fn fail(&mut self, err: anyhow::Error) -> Option<anyhow::Result<Edge>> {
        self.stack.clear();
        Some(Err(err))
    }
}

impl Iterator for History<'_> {
    type Item = anyhow::Result<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            self.visited.insert(start.clone());
            if let Err(err) = self.expand(start) {
                return self.fail(err);
            }
        }

        loop {
            let frame = self.stack.last_mut()?;
            let Some(parent) = frame.parents.get(frame.next).cloned() else {
                self.stack.pop();
                continue;
            };
            frame.next += 1;
            let child = frame.oid.clone();

            if self.visited.insert(parent.clone()) {
                if let Err(err) = self.expand(parent.clone()) {
                    return self.fail(err);
                }
            }

            return Some(Ok(Edge::new(child, parent)));
        }
    }
}
