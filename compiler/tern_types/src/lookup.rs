//! Field and method lookup through embedded fields.
//!
//! The search is breadth-first over embedding depth. At each depth every
//! embedded type is examined; the first depth with a match decides the
//! result. Two matches at that depth, or a match inside a type that is
//! embedded more than once at that depth, make the selector ambiguous.

use rustc_hash::FxHashSet;
use smallvec::smallvec;
use tern_ir::Name;

use crate::{FieldPath, Idx, ObjId, PackageId, Pool, TypeData};

/// Outcome of [`Pool::lookup_field_or_method`].
///
/// | `obj`   | `index`   | `indirect` | meaning                                   |
/// |---------|-----------|------------|-------------------------------------------|
/// | `Some`  | path      | any        | found; `indirect` if a pointer was crossed |
/// | `None`  | non-empty | `false`    | ambiguous at the shallowest depth          |
/// | `None`  | empty     | `true`     | pointer-receiver method, receiver not addressable |
/// | `None`  | empty     | `false`    | not found                                  |
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupResult {
    pub obj: Option<ObjId>,
    pub index: FieldPath,
    pub indirect: bool,
}

impl LookupResult {
    fn found(obj: ObjId, index: FieldPath, indirect: bool) -> Self {
        LookupResult {
            obj: Some(obj),
            index,
            indirect,
        }
    }

    fn ambiguous(index: FieldPath) -> Self {
        tracing::trace!(?index, "ambiguous member");
        LookupResult {
            obj: None,
            index,
            indirect: false,
        }
    }

    #[inline]
    pub fn is_ambiguous(&self) -> bool {
        self.obj.is_none() && !self.index.is_empty()
    }

    /// The match is a method that needs an addressable receiver.
    #[inline]
    pub fn needs_addressable(&self) -> bool {
        self.obj.is_none() && self.indirect
    }
}

/// A type reached through embedding, pending examination.
#[derive(Clone, Debug)]
pub(crate) struct Embedded {
    pub(crate) ty: Idx,
    pub(crate) index: FieldPath,
    /// A pointer was crossed on the way here.
    pub(crate) indirect: bool,
    /// The type is reachable along more than one path at this depth.
    pub(crate) multiples: bool,
}

pub(crate) fn concat(path: &FieldPath, i: usize) -> FieldPath {
    let mut out = path.clone();
    out.push(i);
    out
}

impl Pool {
    /// Look up a field or method `name` in `ty`.
    ///
    /// `addressable` says whether the receiver `x` of `x.name` is
    /// addressable, which lets pointer-receiver methods be selected on a
    /// non-pointer value. `pkg` is the package of the selector; unexported
    /// names match only members declared there.
    pub fn lookup_field_or_method(
        &self,
        ty: Idx,
        addressable: bool,
        pkg: Option<PackageId>,
        name: Name,
    ) -> LookupResult {
        // Named pointer types have fields of the pointee but no methods.
        if let TypeData::Named(data) = self.get(ty) {
            if let TypeData::Pointer(_) = self.get(data.underlying) {
                let result = self.lookup_embedded(data.underlying, false, pkg, name);
                if result.obj.is_some_and(|obj| self.object(obj).is_func()) {
                    return LookupResult::default();
                }
                return result;
            }
        }
        self.lookup_embedded(ty, addressable, pkg, name)
    }

    fn lookup_embedded(
        &self,
        ty: Idx,
        addressable: bool,
        pkg: Option<PackageId>,
        name: Name,
    ) -> LookupResult {
        if name.is_blank() {
            return LookupResult::default();
        }

        let (start, is_ptr) = self.deref(ty);
        // *I for an interface I has no methods.
        if is_ptr && self.is_interface(start) {
            return LookupResult::default();
        }

        let mut current = vec![Embedded {
            ty: start,
            index: smallvec![],
            indirect: is_ptr,
            multiples: false,
        }];
        let mut seen = FxHashSet::default();
        let mut found: Option<(ObjId, FieldPath, bool)> = None;

        while !current.is_empty() {
            let mut next = Vec::new();

            for e in &current {
                let mut typ = e.ty;

                if let TypeData::Named(data) = self.get(typ) {
                    if !seen.insert(typ) {
                        continue;
                    }
                    if let Some((i, method)) = self.find_member(&data.methods, pkg, name) {
                        let index = concat(&e.index, i);
                        if found.is_some() || e.multiples {
                            return LookupResult::ambiguous(index);
                        }
                        found = Some((method, index, e.indirect));
                        // A type cannot have a field and a method of the same name.
                        continue;
                    }
                    typ = data.underlying;
                }

                match self.get(typ) {
                    TypeData::Struct(fields) => {
                        for (i, &field) in fields.iter().enumerate() {
                            let obj = self.object(field);
                            if obj.same_id(pkg, name) {
                                let index = concat(&e.index, i);
                                if found.is_some() || e.multiples {
                                    return LookupResult::ambiguous(index);
                                }
                                found = Some((field, index, e.indirect));
                                continue;
                            }
                            if found.is_none() && obj.is_embedded_field() {
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
                        let methods = self.interface_methods(typ);
                        if let Some((i, method)) = self.find_member(&methods, pkg, name) {
                            let index = concat(&e.index, i);
                            if found.is_some() || e.multiples {
                                return LookupResult::ambiguous(index);
                            }
                            found = Some((method, index, e.indirect));
                        }
                    }
                    _ => {}
                }
            }

            if let Some((obj, index, indirect)) = found {
                if self.object(obj).is_func()
                    && self.has_ptr_recv(obj)
                    && !indirect
                    && !addressable
                {
                    return LookupResult {
                        obj: None,
                        index: FieldPath::new(),
                        indirect: true,
                    };
                }
                return LookupResult::found(obj, index, indirect);
            }

            current = self.consolidate_multiples(next);
        }

        LookupResult::default()
    }

    /// Position and id of the member of `list` identified by (`pkg`, `name`).
    pub(crate) fn find_member(
        &self,
        list: &[ObjId],
        pkg: Option<PackageId>,
        name: Name,
    ) -> Option<(usize, ObjId)> {
        list.iter()
            .copied()
            .enumerate()
            .find(|&(_, obj)| self.object(obj).same_id(pkg, name))
    }

    /// Merge entries for identical types, marking them as reachable along
    /// multiple paths.
    pub(crate) fn consolidate_multiples(&self, list: Vec<Embedded>) -> Vec<Embedded> {
        if list.len() <= 1 {
            return list;
        }
        let mut out: Vec<Embedded> = Vec::with_capacity(list.len());
        for e in list {
            if let Some(prev) = out.iter_mut().find(|p| self.identical(p.ty, e.ty)) {
                prev.multiples = true;
            } else {
                out.push(e);
            }
        }
        out
    }

    /// First method of interface `iface` that `ty` lacks.
    ///
    /// Returns the interface method and whether `ty` has a method of that
    /// name with a different signature. `None` means `ty` implements
    /// `iface`.
    pub fn missing_method(&self, ty: Idx, iface: Idx) -> Option<(ObjId, bool)> {
        let required = self.interface_methods(iface);
        if required.is_empty() {
            return None;
        }

        if self.is_interface(ty) {
            let have = self.interface_methods(ty);
            for m in required {
                let want = self.object(m);
                match self.find_member(&have, want.pkg, want.name) {
                    None => return Some((m, false)),
                    Some((_, got)) if !self.identical(self.object(got).ty, want.ty) => {
                        return Some((m, true));
                    }
                    Some(_) => {}
                }
            }
            return None;
        }

        for m in required {
            let want = self.object(m);
            let result = self.lookup_field_or_method(ty, false, want.pkg, want.name);
            match result.obj {
                Some(got) if self.object(got).is_func() => {
                    if !self.identical(self.object(got).ty, want.ty) {
                        return Some((m, true));
                    }
                }
                _ => return Some((m, false)),
            }
        }
        None
    }
}
