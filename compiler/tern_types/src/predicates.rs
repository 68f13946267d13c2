//! Structural queries over pool types.

use rustc_hash::FxHashSet;

use crate::{BasicInfo, BasicKind, Idx, ObjId, Pool, Signature, TypeData, Var};

impl Pool {
    /// Underlying type: the type itself unless it is named.
    #[inline]
    pub fn underlying(&self, idx: Idx) -> Idx {
        match self.get(idx) {
            TypeData::Named(data) => data.underlying,
            _ => idx,
        }
    }

    /// Type data of the underlying type.
    #[inline]
    pub fn under(&self, idx: Idx) -> &TypeData {
        self.get(self.underlying(idx))
    }

    #[inline]
    pub fn is_named(&self, idx: Idx) -> bool {
        matches!(self.get(idx), TypeData::Named(_))
    }

    /// The `TypeName` object declaring a named type.
    pub fn named_obj(&self, idx: Idx) -> Option<ObjId> {
        match self.get(idx) {
            TypeData::Named(data) => Some(data.obj),
            _ => None,
        }
    }

    /// Basic kind of the underlying type, if basic.
    pub fn basic_kind(&self, idx: Idx) -> Option<BasicKind> {
        match self.under(idx) {
            TypeData::Basic(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Basic properties; empty for non-basic types.
    pub fn basic_info(&self, idx: Idx) -> BasicInfo {
        self.basic_kind(idx).map_or(BasicInfo::empty(), BasicKind::info)
    }

    #[inline]
    pub fn is_untyped(&self, idx: Idx) -> bool {
        self.basic_info(idx).contains(BasicInfo::UNTYPED)
    }

    #[inline]
    pub fn is_interface(&self, idx: Idx) -> bool {
        matches!(self.under(idx), TypeData::Interface(_))
    }

    #[inline]
    pub fn is_tuple(&self, idx: Idx) -> bool {
        matches!(self.get(idx), TypeData::Tuple(_))
    }

    /// Signature of the underlying type, if it is a function type.
    pub fn signature_of(&self, idx: Idx) -> Option<&Signature> {
        match self.under(idx) {
            TypeData::Signature(sig) => Some(sig),
            _ => None,
        }
    }

    /// Entries of a tuple; empty for non-tuples.
    pub fn tuple_vars(&self, idx: Idx) -> &[Var] {
        match self.get(idx) {
            TypeData::Tuple(vars) => vars,
            _ => &[],
        }
    }

    #[inline]
    pub fn tuple_len(&self, idx: Idx) -> usize {
        self.tuple_vars(idx).len()
    }

    /// Element type of an underlying slice.
    pub fn slice_elem(&self, idx: Idx) -> Option<Idx> {
        match self.under(idx) {
            TypeData::Slice(elem) => Some(*elem),
            _ => None,
        }
    }

    /// Base type of an underlying pointer.
    pub fn pointer_base(&self, idx: Idx) -> Option<Idx> {
        match self.under(idx) {
            TypeData::Pointer(base) => Some(*base),
            _ => None,
        }
    }

    /// Strip one level of unnamed pointer: `*T` gives `(T, true)`.
    pub fn deref(&self, idx: Idx) -> (Idx, bool) {
        match self.get(idx) {
            TypeData::Pointer(base) => (*base, true),
            _ => (idx, false),
        }
    }

    /// Whether the method object has a pointer receiver.
    pub fn has_ptr_recv(&self, method: ObjId) -> bool {
        self.signature_of(self.object(method).ty)
            .and_then(|sig| sig.recv)
            .is_some_and(|recv| matches!(self.get(recv.ty), TypeData::Pointer(_)))
    }

    /// Whether `nil` is a valid value of the type.
    pub fn has_nil(&self, idx: Idx) -> bool {
        match self.under(idx) {
            TypeData::Pointer(_)
            | TypeData::Slice(_)
            | TypeData::Map { .. }
            | TypeData::Chan(_)
            | TypeData::Signature(_)
            | TypeData::Interface(_) => true,
            TypeData::Basic(kind) => *kind == BasicKind::UntypedNil,
            _ => false,
        }
    }

    /// The type an untyped value takes when no context type applies.
    pub fn default_type(&self, idx: Idx) -> Idx {
        match self.get(idx) {
            TypeData::Basic(kind) => kind.default_kind().idx(),
            _ => idx,
        }
    }

    /// All methods of an interface, declared ones first, then those of
    /// embedded interfaces in order. Duplicates by name are dropped.
    pub fn interface_methods(&self, idx: Idx) -> Vec<ObjId> {
        let mut out = Vec::new();
        let mut visited = FxHashSet::default();
        self.collect_interface_methods(self.underlying(idx), &mut out, &mut visited);
        out
    }

    fn collect_interface_methods(
        &self,
        idx: Idx,
        out: &mut Vec<ObjId>,
        visited: &mut FxHashSet<Idx>,
    ) {
        if !visited.insert(idx) {
            return;
        }
        let TypeData::Interface(data) = self.get(idx) else {
            return;
        };
        for &m in &data.methods {
            let name = self.object(m).name;
            if !out.iter().any(|&o| self.object(o).name == name) {
                out.push(m);
            }
        }
        for &embed in &data.embeds {
            self.collect_interface_methods(self.underlying(embed), out, visited);
        }
    }

    /// Structural type identity.
    ///
    /// Named types are identical only to themselves. Parameter names and
    /// receivers do not participate.
    pub fn identical(&self, a: Idx, b: Idx) -> bool {
        if a == b {
            return true;
        }
        match (self.get(a), self.get(b)) {
            (TypeData::Slice(x), TypeData::Slice(y))
            | (TypeData::Pointer(x), TypeData::Pointer(y))
            | (TypeData::Chan(x), TypeData::Chan(y)) => self.identical(*x, *y),
            (TypeData::Map { key: k1, value: v1 }, TypeData::Map { key: k2, value: v2 }) => {
                self.identical(*k1, *k2) && self.identical(*v1, *v2)
            }
            (TypeData::Tuple(xs), TypeData::Tuple(ys)) => {
                xs.len() == ys.len()
                    && xs.iter().zip(ys).all(|(x, y)| self.identical(x.ty, y.ty))
            }
            (TypeData::Signature(s), TypeData::Signature(t)) => {
                s.variadic == t.variadic
                    && self.identical(s.params, t.params)
                    && self.identical(s.results, t.results)
            }
            (TypeData::Struct(fs), TypeData::Struct(gs)) => {
                fs.len() == gs.len()
                    && fs.iter().zip(gs).all(|(&f, &g)| {
                        let (f, g) = (self.object(f), self.object(g));
                        f.is_embedded_field() == g.is_embedded_field()
                            && g.same_id(f.pkg, f.name)
                            && self.identical(f.ty, g.ty)
                    })
            }
            (TypeData::Interface(_), TypeData::Interface(_)) => {
                let (ms, ns) = (self.interface_methods(a), self.interface_methods(b));
                ms.len() == ns.len()
                    && ms.iter().all(|&m| {
                        let m = self.object(m);
                        ns.iter().any(|&n| {
                            let n = self.object(n);
                            n.same_id(m.pkg, m.name) && self.identical(m.ty, n.ty)
                        })
                    })
            }
            _ => false,
        }
    }
}
