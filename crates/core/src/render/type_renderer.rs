use crate::{
    error::{Error, Result},
    render::ImportRegistry,
    types::{ArrayLength, ChanDir, MethodDescriptor, Parameter, Signature, TypeDescriptor},
};

/// Turns type descriptors back into source text.
///
/// Every package reached through a named type is registered in the borrowed
/// [`ImportRegistry`], so the registry is complete once all signatures of a
/// run have been rendered.
pub struct TypeRenderer<'r> {
    imports: &'r mut ImportRegistry,
}

impl<'r> TypeRenderer<'r> {
    pub fn new(imports: &'r mut ImportRegistry) -> Self {
        Self { imports }
    }

    pub fn render(&mut self, ty: &TypeDescriptor) -> Result<String> {
        match ty {
            TypeDescriptor::Primitive { name } => Ok(name.clone()),
            TypeDescriptor::Named { package: None, name } => Ok(name.clone()),
            TypeDescriptor::Named {
                package: Some(pkg),
                name,
            } => {
                let alias = self.imports.register(&pkg.path, &pkg.name);
                Ok(format!("{alias}.{name}"))
            }
            TypeDescriptor::Pointer { elem } => Ok(format!("*{}", self.render(elem)?)),
            TypeDescriptor::Slice { elem } => Ok(format!("[]{}", self.render(elem)?)),
            TypeDescriptor::Array {
                len: ArrayLength::Literal(len),
                elem,
            } => Ok(format!("[{len}]{}", self.render(elem)?)),
            TypeDescriptor::Array {
                len: ArrayLength::Expr(expr),
                ..
            } => Err(Error::UnsupportedType(format!(
                "array length {expr} is not a literal: {ty}"
            ))),
            TypeDescriptor::Map { key, value } => Ok(format!(
                "map[{}]{}",
                self.render(key)?,
                self.render(value)?
            )),
            TypeDescriptor::Chan { dir, elem } => {
                let elem_text = self.render(elem)?;
                Ok(match dir {
                    ChanDir::Send => format!("chan<- {elem_text}"),
                    ChanDir::Recv => format!("<-chan {elem_text}"),
                    // `chan <-chan T` would parse as `chan<- chan T`
                    ChanDir::Both if is_recv_chan(elem) => format!("chan ({elem_text})"),
                    ChanDir::Both => format!("chan {elem_text}"),
                })
            }
            TypeDescriptor::Func(sig) => Ok(format!("func{}", self.render_signature(sig)?)),
            TypeDescriptor::Interface { members } if members.is_empty() => {
                Ok("interface{}".to_string())
            }
            TypeDescriptor::Interface { .. } => Err(Error::UnsupportedType(format!(
                "non-empty interface {ty}"
            ))),
            TypeDescriptor::Struct { .. } | TypeDescriptor::TypeParam { .. } => {
                Err(Error::UnsupportedType(ty.to_string()))
            }
        }
    }

    /// Renders `(params) results` for an arbitrary signature
    pub fn render_signature(&mut self, sig: &Signature) -> Result<String> {
        let func = MethodDescriptor::from_signature("func", sig)?;
        self.render_func_type(&func)
    }

    /// Renders `(params) results` the way a function type spells it: param
    /// names only when the source named them, result types only.
    pub fn render_func_type(&mut self, func: &MethodDescriptor) -> Result<String> {
        let params = self.render_params(func, func.has_named_params())?;
        let results = self.render_result_types(func)?;

        let results = match results.len() {
            0 => String::new(),
            1 => format!(" {}", results[0]),
            _ => format!(" ({})", results.join(", ")),
        };
        Ok(format!("({}){results}", params.join(", ")))
    }

    /// One entry per parameter, `name type` or just `type`
    pub fn render_params(&mut self, func: &MethodDescriptor, with_names: bool) -> Result<Vec<String>> {
        let last = func.params.len().saturating_sub(1);
        let mut rendered = Vec::with_capacity(func.params.len());
        for (index, param) in func.params.iter().enumerate() {
            let mut entry = String::new();
            if with_names {
                entry.push_str(&param.name);
                entry.push(' ');
            }
            if func.variadic && index == last {
                entry.push_str("...");
            }
            entry.push_str(&self.render(&param.ty)?);
            rendered.push(entry);
        }
        Ok(rendered)
    }

    pub fn render_result_types(&mut self, func: &MethodDescriptor) -> Result<Vec<String>> {
        func.results.iter().map(|r| self.render(&r.ty)).collect()
    }

    /// Results as `name type` pairs
    pub fn render_named_results(&mut self, results: &[Parameter]) -> Result<Vec<String>> {
        results
            .iter()
            .map(|r| -> Result<String> { Ok(format!("{} {}", r.name, self.render(&r.ty)?)) })
            .collect()
    }
}

fn is_recv_chan(ty: &TypeDescriptor) -> bool {
    matches!(
        ty,
        TypeDescriptor::Chan {
            dir: ChanDir::Recv,
            ..
        }
    )
}
