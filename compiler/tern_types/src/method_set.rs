//! Method sets.
//!
//! The method set of `T` holds the value-receiver methods of `T` and of
//! every type embedded (at any depth) by value; the method set of `*T`
//! adds pointer-receiver methods. Shallower depths shadow deeper ones,
//! and a field or a second method of the same name at the same depth
//! removes the name from the set.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::smallvec;
use tern_ir::Name;

use crate::lookup::{concat, Embedded};
use crate::{FieldPath, Idx, ObjId, PackageId, Pool, Selection, SelectionKind, TypeData};

/// Methods of a type, sorted by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MethodSet {
    list: Vec<Selection>,
}

impl MethodSet {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selection> {
        self.list.iter()
    }

    /// The method identified by (`pkg`, `name`).
    pub fn lookup(&self, pool: &Pool, pkg: Option<PackageId>, name: Name) -> Option<&Selection> {
        self.list
            .iter()
            .find(|sel| pool.object(sel.obj).same_id(pkg, name))
    }
}

/// Member identity: unexported names are qualified by their package.
type MemberKey = (Name, Option<PackageId>);

impl Pool {
    fn member_key(&self, obj: ObjId) -> MemberKey {
        let o = self.object(obj);
        (o.name, if o.exported { None } else { o.pkg })
    }

    /// Compute the method set of `ty`.
    pub fn method_set(&self, ty: Idx) -> MethodSet {
        let (start, is_ptr) = self.deref(ty);
        if is_ptr && self.is_interface(start) {
            return MethodSet::default();
        }

        // `None` entries record collisions.
        let mut base: FxHashMap<MemberKey, Option<Selection>> = FxHashMap::default();
        let mut current = vec![Embedded {
            ty: start,
            index: smallvec![],
            indirect: is_ptr,
            multiples: false,
        }];
        let mut seen = FxHashSet::default();

        while !current.is_empty() {
            let mut next = Vec::new();
            let mut fields: FxHashMap<MemberKey, Option<ObjId>> = FxHashMap::default();
            let mut methods: FxHashMap<MemberKey, Option<Selection>> = FxHashMap::default();

            for e in &current {
                let mut typ = e.ty;

                if let TypeData::Named(data) = self.get(typ) {
                    if !seen.insert(typ) {
                        continue;
                    }
                    self.add_methods(&mut methods, ty, &data.methods, e, e.indirect);
                    typ = data.underlying;
                }

                match self.get(typ) {
                    TypeData::Struct(list) => {
                        for (i, &field) in list.iter().enumerate() {
                            let key = self.member_key(field);
                            if !e.multiples && !fields.contains_key(&key) {
                                fields.insert(key, Some(field));
                            } else {
                                fields.insert(key, None);
                            }
                            let obj = self.object(field);
                            if obj.is_embedded_field() {
                                let (embedded, is_ptr) = self.deref(obj.ty);
                                next.push(Embedded {
                                    ty: embedded,
                                    index: concat(&e.index, i),
                                    indirect: e.indirect || is_ptr,
                                    multiples: e.multiples,
                                });
                            }
                        }
                    }
                    TypeData::Interface(_) => {
                        let list = self.interface_methods(typ);
                        self.add_methods(&mut methods, ty, &list, e, true);
                    }
                    _ => {}
                }
            }

            // Methods at this depth enter the set unless a shallower entry
            // exists. A field of the same name at this depth collides.
            for (key, entry) in methods {
                base.entry(key).or_insert_with(|| {
                    if fields.contains_key(&key) {
                        None
                    } else {
                        entry
                    }
                });
            }
            // Colliding fields shadow everything deeper.
            for (key, field) in fields {
                if field.is_none() {
                    base.entry(key).or_insert(None);
                }
            }

            current = self.consolidate_multiples(next);
        }

        let mut list: Vec<Selection> = base.into_values().flatten().collect();
        list.sort_by(|a, b| {
            let (ka, kb) = (self.member_key(a.obj), self.member_key(b.obj));
            self.name_str(ka.0)
                .cmp(self.name_str(kb.0))
                .then(ka.1.cmp(&kb.1))
        });
        MethodSet { list }
    }

    fn add_methods(
        &self,
        set: &mut FxHashMap<MemberKey, Option<Selection>>,
        recv: Idx,
        list: &[ObjId],
        e: &Embedded,
        indirect: bool,
    ) {
        for (i, &method) in list.iter().enumerate() {
            let key = self.member_key(method);
            let eligible = indirect || !self.has_ptr_recv(method);
            if !e.multiples && !set.contains_key(&key) && eligible {
                let index: FieldPath = concat(&e.index, i);
                set.insert(
                    key,
                    Some(Selection {
                        kind: SelectionKind::MethodVal,
                        recv,
                        obj: method,
                        index,
                        indirect,
                    }),
                );
            } else {
                set.insert(key, None);
            }
        }
    }
}
