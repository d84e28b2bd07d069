//! RBS method types to [`Sig`]s.

use smol_str::SmolStr;

use super::types::TypeTranslator;
use crate::error::TranslationError;
use crate::model::{Method, ParamKind, Sig, SigParam, TypeExpr};
use crate::rbs::{FnParam, MethodType};

/// Translate `method_type` into a signature for `method`.
///
/// Entries of the method type are matched against the method's parameters
/// of the same kind, in order. An entry takes its own name when it has one
/// and the matched parameter's name otherwise. An entry with no parameter
/// left to match fails, named or not, and so does a block type on a method
/// without a block parameter.
///
/// The resulting parameters follow the method's parameter order.
#[tracing::instrument(skip_all, fields(method = %method.name))]
pub fn translate_sig(method: &Method, method_type: &MethodType) -> Result<Sig, TranslationError> {
    let translator = TypeTranslator::with_type_params(method_type.type_params.iter().cloned());
    let mut zip = Zipper::new(method);
    let function = &method_type.function;

    for (position, entry) in function.positionals().enumerate() {
        zip.next_matching(ParamKind::is_positional, entry, "positional", position, &translator)?;
    }
    if let Some(rest) = &function.rest {
        zip.next_matching(|k| *k == ParamKind::Rest, rest, "rest", 0, &translator)?;
    }
    let keywords = function
        .required_keywords
        .iter()
        .chain(&function.optional_keywords);
    for (position, (key, entry)) in keywords.enumerate() {
        let entry = FnParam {
            ty: entry.ty.clone(),
            name: Some(key.clone()),
        };
        zip.next_matching(ParamKind::is_keyword, &entry, "keyword", position, &translator)?;
    }
    if let Some(rest) = &function.rest_keywords {
        zip.next_matching(
            |k| *k == ParamKind::KeywordRest,
            rest,
            "keyword rest",
            0,
            &translator,
        )?;
    }
    if let Some(block) = &method_type.block {
        let Some(index) = method.params.iter().position(|p| p.kind == ParamKind::Block) else {
            return Err(TranslationError::MissingBlock {
                method: method.name.clone(),
            });
        };
        let ty = translator.translate_block(block);
        zip.fill(index, method.params[index].name.clone(), ty);
    }

    let mut sig = Sig::new().returns(translator.translate(&function.returns));
    sig.type_params = method_type.type_params.clone();
    sig.params = zip.finish();
    tracing::debug!(params = sig.params.len(), "translated signature");
    Ok(sig)
}

/// Pairs method-type entries with the method's parameters.
struct Zipper<'m> {
    method: &'m Method,
    /// One slot per method parameter.
    slots: Vec<Option<SigParam>>,
}

impl<'m> Zipper<'m> {
    fn new(method: &'m Method) -> Self {
        Self {
            method,
            slots: vec![None; method.params.len()],
        }
    }

    fn next_matching(
        &mut self,
        kind: impl Fn(&ParamKind) -> bool,
        entry: &FnParam,
        kind_name: &'static str,
        position: usize,
        translator: &TypeTranslator,
    ) -> Result<(), TranslationError> {
        let ty = translator.translate(&entry.ty);
        let free = self
            .method
            .params
            .iter()
            .enumerate()
            .find(|(i, p)| kind(&p.kind) && self.slots[*i].is_none())
            .map(|(i, _)| i);

        let Some(index) = free else {
            return Err(TranslationError::MissingParam {
                method: self.method.name.clone(),
                kind: kind_name,
                position,
            });
        };
        let name = entry
            .name
            .clone()
            .unwrap_or_else(|| self.method.params[index].name.clone());
        self.fill(index, name, ty);
        Ok(())
    }

    fn fill(&mut self, index: usize, name: SmolStr, ty: TypeExpr) {
        self.slots[index] = Some(SigParam::new(name, ty));
    }

    fn finish(self) -> Vec<SigParam> {
        self.slots.into_iter().flatten().collect()
    }
}
