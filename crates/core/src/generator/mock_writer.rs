use std::borrow::Cow;

use crate::{
    error::{Error, Result},
    render::{ImportRegistry, TypeRenderer},
    types::{InterfaceDescriptor, MethodDescriptor},
};

/// Writes the struct and forwarding methods of one mock.
pub(crate) struct MockWriter<'r> {
    renderer: TypeRenderer<'r>,
    tb_type: String,
    assert_alias: String,
}

impl<'r> MockWriter<'r> {
    pub(crate) fn new(imports: &'r mut ImportRegistry, testing_alias: &str, assert_alias: &str) -> Self {
        Self {
            renderer: TypeRenderer::new(imports),
            tb_type: format!("{testing_alias}.TB"),
            assert_alias: assert_alias.to_string(),
        }
    }

    pub(crate) fn write_mock(
        &mut self,
        out: &mut String,
        target: &str,
        iface: &InterfaceDescriptor,
    ) -> Result<()> {
        let mock_name = format!("Mock{target}");

        out.push('\n');
        out.push_str(&format!(
            "// {mock_name} implements a mock {}.{} from {}\n",
            iface.package_name, iface.name, iface.package_path
        ));
        out.push_str(&format!("type {mock_name} struct {{\n"));
        out.push_str(&format!("\tTB {}\n", self.tb_type));
        out.push('\n');
        for method in &iface.methods {
            let func_type = self.renderer.render_func_type(method)?;
            out.push_str(&format!(
                "\tFn{:<width$} func{func_type}\n",
                method.name,
                width = iface.longest_method_name
            ));
        }
        out.push_str("}\n");

        for method in &iface.methods {
            out.push('\n');
            self.write_method(out, &mock_name, method)?;
        }
        Ok(())
    }

    fn write_method(&mut self, out: &mut String, mock_name: &str, method: &MethodDescriptor) -> Result<()> {
        // the body calls into the assert package, so no local may shadow it
        let method = rename_shadowing(method, &self.assert_alias);
        let method = method.as_ref();
        let params = self.renderer.render_params(method, true)?;
        let results = self.renderer.render_named_results(&method.results)?;
        ensure_count(method, "parameters", params.len(), method.params.len())?;
        ensure_count(method, "results", results.len(), method.results.len())?;

        let receiver = receiver_name(method);
        let name = &method.name;
        let args = method.invoke_args().join(", ");
        let results = if results.is_empty() {
            String::new()
        } else {
            format!(" ({})", results.join(", "))
        };
        let fail = format!(
            "{}.Fail({receiver}.TB, \"{mock_name}.{name} must not be called\")",
            self.assert_alias
        );

        out.push_str(&format!(
            "func ({receiver} *{mock_name}) {name}({}){results} {{\n",
            params.join(", ")
        ));
        out.push_str(&format!("\tif {receiver}.Fn{name} != nil {{\n"));
        if method.results.is_empty() {
            out.push_str(&format!("\t\t{receiver}.Fn{name}({args})\n"));
            out.push_str("\t} else {\n");
            out.push_str(&format!("\t\t{fail}\n"));
            out.push_str("\t}\n");
        } else {
            // the failure call only records; the bare return yields zero values
            out.push_str(&format!("\t\treturn {receiver}.Fn{name}({args})\n"));
            out.push_str("\t}\n");
            out.push_str(&format!("\t{fail}\n"));
            out.push_str("\treturn\n");
        }
        out.push_str("}\n");
        Ok(())
    }
}

fn ensure_count(method: &MethodDescriptor, what: &str, rendered: usize, declared: usize) -> Result<()> {
    if rendered != declared {
        return Err(Error::InternalConsistency(format!(
            "{} rendered {rendered} {what} but declares {declared}",
            method.name
        )));
    }
    Ok(())
}

/// Renames parameters and results called `reserved` by appending `_` until
/// the name is free
fn rename_shadowing<'a>(method: &'a MethodDescriptor, reserved: &str) -> Cow<'a, MethodDescriptor> {
    let shadows = method
        .params
        .iter()
        .chain(method.results.iter())
        .any(|p| p.name == reserved);
    if !shadows {
        return Cow::Borrowed(method);
    }

    let mut renamed = method.clone();
    let mut name = format!("{reserved}_");
    while renamed
        .params
        .iter()
        .chain(renamed.results.iter())
        .any(|p| p.name == name)
    {
        name.push('_');
    }
    for param in renamed.params.iter_mut().chain(renamed.results.iter_mut()) {
        if param.name == reserved {
            param.name = name.clone();
        }
    }
    Cow::Owned(renamed)
}

/// `m`, unless a parameter or result already uses that name
fn receiver_name(method: &MethodDescriptor) -> String {
    let mut receiver = "m".to_string();
    while method
        .params
        .iter()
        .chain(method.results.iter())
        .any(|p| p.name == receiver)
    {
        receiver.push('_');
    }
    receiver
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Signature, TypeDescriptor, Variable};

    fn write(method: MethodDescriptor) -> String {
        let mut imports = ImportRegistry::new(None);
        let mut writer = MockWriter::new(&mut imports, "testing", "assert");
        let mut out = String::new();
        writer.write_method(&mut out, "MockStore", &method).unwrap();
        out
    }

    fn var(name: &str, ty: TypeDescriptor) -> Variable {
        Variable {
            name: name.to_string(),
            ty,
        }
    }

    #[test]
    fn test_method_without_results() {
        let sig = Signature {
            params: vec![
                var("x", TypeDescriptor::primitive("int")),
                var("", TypeDescriptor::primitive("string")),
            ],
            ..Default::default()
        };
        let out = write(MethodDescriptor::from_signature("Put", &sig).unwrap());
        assert_eq!(
            out,
            "func (m *MockStore) Put(x int, p1 string) {\n\
             \tif m.FnPut != nil {\n\
             \t\tm.FnPut(x, p1)\n\
             \t} else {\n\
             \t\tassert.Fail(m.TB, \"MockStore.Put must not be called\")\n\
             \t}\n\
             }\n"
        );
    }

    #[test]
    fn test_method_with_results() {
        let sig = Signature {
            params: vec![var("", TypeDescriptor::primitive("string"))],
            results: vec![
                var("", TypeDescriptor::primitive("int")),
                var("", TypeDescriptor::primitive("error")),
            ],
            variadic: false,
        };
        let out = write(MethodDescriptor::from_signature("Get", &sig).unwrap());
        assert_eq!(
            out,
            "func (m *MockStore) Get(p0 string) (p1 int, p2 error) {\n\
             \tif m.FnGet != nil {\n\
             \t\treturn m.FnGet(p0)\n\
             \t}\n\
             \tassert.Fail(m.TB, \"MockStore.Get must not be called\")\n\
             \treturn\n\
             }\n"
        );
    }

    #[test]
    fn test_variadic_method_forwards_with_ellipsis() {
        let sig = Signature {
            params: vec![var("xs", TypeDescriptor::slice(TypeDescriptor::primitive("int")))],
            results: vec![],
            variadic: true,
        };
        let out = write(MethodDescriptor::from_signature("M", &sig).unwrap());
        assert!(out.starts_with("func (m *MockStore) M(xs ...int) {\n"));
        assert!(out.contains("\t\tm.FnM(xs...)\n"));
    }

    #[test]
    fn test_receiver_avoids_parameter_names() {
        let sig = Signature {
            params: vec![var("m", TypeDescriptor::primitive("int"))],
            ..Default::default()
        };
        let out = write(MethodDescriptor::from_signature("Set", &sig).unwrap());
        assert!(out.starts_with("func (m_ *MockStore) Set(m int) {\n"));
        assert!(out.contains("\t\tm_.FnSet(m)\n"));
    }

    #[test]
    fn test_parameters_do_not_shadow_assert_package() {
        let sig = Signature {
            params: vec![var("assert", TypeDescriptor::primitive("bool"))],
            ..Default::default()
        };
        let out = write(MethodDescriptor::from_signature("Check", &sig).unwrap());
        assert_eq!(
            out,
            "func (m *MockStore) Check(assert_ bool) {\n\
             \tif m.FnCheck != nil {\n\
             \t\tm.FnCheck(assert_)\n\
             \t} else {\n\
             \t\tassert.Fail(m.TB, \"MockStore.Check must not be called\")\n\
             \t}\n\
             }\n"
        );
    }

    #[test]
    fn test_renamed_parameter_skips_taken_names() {
        let sig = Signature {
            params: vec![
                var("assert", TypeDescriptor::primitive("bool")),
                var("assert_", TypeDescriptor::primitive("int")),
            ],
            results: vec![var("", TypeDescriptor::primitive("error"))],
            variadic: false,
        };
        let out = write(MethodDescriptor::from_signature("Check", &sig).unwrap());
        assert!(out.starts_with("func (m *MockStore) Check(assert__ bool, assert_ int) (p2 error) {\n"));
        assert!(out.contains("\t\treturn m.FnCheck(assert__, assert_)\n"));
        assert!(out.contains("\tassert.Fail(m.TB, "));
    }
}
