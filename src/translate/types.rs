//! RBS types to [`TypeExpr`].

use smol_str::SmolStr;

use crate::model::{ProcType, TypeExpr};
use crate::rbs::{BaseType, Block, Function, RbsType};

/// Core classes written with their Sorbet generic alias when parameterized.
const GENERIC_ALIASES: &[(&str, &str)] = &[
    ("Array", "T::Array"),
    ("Hash", "T::Hash"),
    ("Set", "T::Set"),
    ("Range", "T::Range"),
    ("Enumerable", "T::Enumerable"),
    ("Enumerator", "T::Enumerator"),
    ("Enumerator::Lazy", "T::Enumerator::Lazy"),
    ("Class", "T::Class"),
];

/// Translate a standalone RBS type.
pub fn translate_type(ty: &RbsType) -> TypeExpr {
    TypeTranslator::default().translate(ty)
}

/// Translates RBS types, resolving the free type parameters in scope.
#[derive(Clone, Debug, Default)]
pub struct TypeTranslator {
    type_params: Vec<SmolStr>,
}

impl TypeTranslator {
    /// A translator where `type_params` name type variables rather than
    /// classes.
    pub fn with_type_params(type_params: impl IntoIterator<Item = SmolStr>) -> Self {
        Self {
            type_params: type_params.into_iter().collect(),
        }
    }

    pub fn translate(&self, ty: &RbsType) -> TypeExpr {
        match ty {
            RbsType::Base(base) => translate_base(*base),
            RbsType::ClassInstance { name, args } if args.is_empty() => {
                if self.type_params.contains(name) {
                    TypeExpr::TypeParameter(name.clone())
                } else {
                    TypeExpr::Simple(name.clone())
                }
            }
            RbsType::ClassInstance { name, args } => {
                let bare = name.strip_prefix("::").unwrap_or(name.as_str());
                let base = GENERIC_ALIASES
                    .iter()
                    .find(|(class, _)| *class == bare)
                    .map_or_else(|| name.clone(), |(_, alias)| SmolStr::new(alias));
                TypeExpr::Generic {
                    base,
                    args: self.translate_all(args),
                }
            }
            RbsType::ClassSingleton { name } => TypeExpr::class_of(TypeExpr::Simple(name.clone())),
            RbsType::Union(types) => TypeExpr::Union(self.translate_all(types)),
            RbsType::Intersection(types) => TypeExpr::Intersection(self.translate_all(types)),
            RbsType::Optional(inner) => TypeExpr::nilable(self.translate(inner)),
            RbsType::Tuple(types) => TypeExpr::Tuple(self.translate_all(types)),
            RbsType::Record(fields) => TypeExpr::Shape(
                fields
                    .iter()
                    .map(|(key, ty)| (key.clone(), self.translate(ty)))
                    .collect(),
            ),
            RbsType::Proc(proc_sig) => {
                let mut proc_type =
                    self.translate_function(&proc_sig.function, proc_sig.block.as_ref());
                if let Some(self_type) = &proc_sig.self_type {
                    proc_type = proc_type.bind(self.translate(self_type));
                }
                proc_type.into()
            }
            // Interfaces and literals have no Sorbet counterpart.
            RbsType::Interface { .. } | RbsType::Literal(_) => TypeExpr::Untyped,
        }
    }

    fn translate_all(&self, types: &[RbsType]) -> Vec<TypeExpr> {
        types.iter().map(|ty| self.translate(ty)).collect()
    }

    /// A proc type for a function: unnamed positionals are `arg0`, `arg1`,
    /// ...; rest is `args`, keyword rest `kwargs` and the block `blk`.
    pub(crate) fn translate_function(&self, function: &Function, block: Option<&Block>) -> ProcType {
        let mut proc_type = ProcType::new();
        for (i, param) in function.positionals().enumerate() {
            let name = param
                .name
                .clone()
                .unwrap_or_else(|| SmolStr::from(format!("arg{i}")));
            proc_type = proc_type.param(name, self.translate(&param.ty));
        }
        if let Some(rest) = &function.rest {
            let name = rest.name.clone().unwrap_or_else(|| SmolStr::new("args"));
            proc_type = proc_type.param(name, self.translate(&rest.ty));
        }
        for (key, param) in function
            .required_keywords
            .iter()
            .chain(&function.optional_keywords)
        {
            proc_type = proc_type.param(key.clone(), self.translate(&param.ty));
        }
        if let Some(rest) = &function.rest_keywords {
            let name = rest.name.clone().unwrap_or_else(|| SmolStr::new("kwargs"));
            proc_type = proc_type.param(name, self.translate(&rest.ty));
        }
        if let Some(block) = block {
            proc_type = proc_type.param("blk", self.translate_block(block));
        }
        proc_type.returns(self.translate(&function.returns))
    }

    /// A block as a proc type, nilable when the block is optional.
    pub(crate) fn translate_block(&self, block: &Block) -> TypeExpr {
        let mut proc_type = self.translate_function(&block.function, None);
        if let Some(self_type) = &block.self_type {
            proc_type = proc_type.bind(self.translate(self_type));
        }
        let ty = TypeExpr::Proc(proc_type);
        if block.required {
            ty
        } else {
            TypeExpr::nilable(ty)
        }
    }
}

fn translate_base(base: BaseType) -> TypeExpr {
    match base {
        BaseType::Any | BaseType::Class => TypeExpr::Untyped,
        BaseType::Bool => TypeExpr::Boolean,
        BaseType::Bottom => TypeExpr::NoReturn,
        BaseType::Instance => TypeExpr::AttachedClass,
        BaseType::Nil => TypeExpr::simple("NilClass"),
        BaseType::SelfType => TypeExpr::SelfType,
        BaseType::Top => TypeExpr::Anything,
        BaseType::Void => TypeExpr::Void,
    }
}
