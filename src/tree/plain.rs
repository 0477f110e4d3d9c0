use super::{validate, Discipline, Error, Key, Kind, SearchResult, Tree};

/// Plain binary search tree: placement only, no rebalancing.
#[derive(Debug, Clone, Copy)]
pub struct Plain;

impl Discipline for Plain {
    const KIND: Kind = Kind::Bst;
    type Aug = ();

    fn insert(tree: &mut Tree<Self>, key: Key) -> Result<(), Error> {
        tree.insert_leaf(key, ())?;
        Ok(())
    }

    fn delete(tree: &mut Tree<Self>, key: Key) -> Result<(), Error> {
        let SearchResult::Here(ptr) = tree.search(key) else {
            return Err(Error::KeyNotFound(key));
        };
        tree.splice_out(ptr);
        Ok(())
    }

    fn is_well_formed(tree: &Tree<Self>) -> bool {
        validate::ordered(tree)
    }
}
