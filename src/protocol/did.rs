//! Candid service descriptions, parsed with `candid_parser`

use candid::types::{FuncMode, Type, TypeEnv, TypeInner};
use candid_parser::{check_prog, IDLProg};

use super::{
    error::IdlParseError,
    idl::{CallMode, IdlType, InterfaceDescription, MethodSignature},
};

/// Deepest `opt`/`vec`/alias chain accepted; recursive types hit this
const MAX_TYPE_DEPTH: usize = 32;

/// Parse and type-check a `.did` source, then convert its service
pub(crate) fn parse_service(source: &str) -> Result<InterfaceDescription, IdlParseError> {
    let prog = source
        .parse::<IDLProg>()
        .map_err(|e| IdlParseError::new(e.to_string()))?;

    let mut env = TypeEnv::new();
    let actor = check_prog(&mut env, &prog)
        .map_err(|e| IdlParseError::new(e.to_string()))?
        .ok_or_else(|| IdlParseError::new("no service declared"))?;

    let methods = env
        .as_service(&actor)
        .map_err(|e| IdlParseError::new(e.to_string()))?;

    let mut iface = InterfaceDescription::new();
    for (name, ty) in methods {
        if iface.method(name).is_some() {
            return Err(IdlParseError::new(format!("duplicate method {:?}", name)));
        }

        let func = env
            .as_func(ty)
            .map_err(|e| IdlParseError::new(format!("{}: {}", name, e)))?;

        let mode = if func
            .modes
            .iter()
            .any(|mode| matches!(mode, FuncMode::Query | FuncMode::CompositeQuery))
        {
            CallMode::Query
        } else {
            CallMode::Update
        };

        let args = convert_all(&env, &func.args)?;
        let returns = convert_all(&env, &func.rets)?;
        iface = iface.with_method(name.clone(), MethodSignature::new(args, returns, mode));
    }

    Ok(iface)
}

fn convert_all(env: &TypeEnv, types: &[Type]) -> Result<Vec<IdlType>, IdlParseError> {
    types.iter().map(|ty| convert(env, ty, 0)).collect()
}

fn convert(env: &TypeEnv, ty: &Type, depth: usize) -> Result<IdlType, IdlParseError> {
    if depth > MAX_TYPE_DEPTH {
        return Err(IdlParseError::new(format!("type {} nests too deeply", ty)));
    }

    let converted = match ty.as_ref() {
        TypeInner::Var(id) => {
            let target = env
                .find_type(id)
                .map_err(|e| IdlParseError::new(e.to_string()))?;
            return convert(env, target, depth + 1);
        }
        TypeInner::Opt(inner) => IdlType::Opt(Box::new(convert(env, inner, depth + 1)?)),
        TypeInner::Vec(inner) => IdlType::Vec(Box::new(convert(env, inner, depth + 1)?)),
        TypeInner::Text => IdlType::Text,
        TypeInner::Bool => IdlType::Bool,
        TypeInner::Nat => IdlType::Nat,
        TypeInner::Nat8 => IdlType::Nat8,
        TypeInner::Nat16 => IdlType::Nat16,
        TypeInner::Nat32 => IdlType::Nat32,
        TypeInner::Nat64 => IdlType::Nat64,
        TypeInner::Int => IdlType::Int,
        TypeInner::Int8 => IdlType::Int8,
        TypeInner::Int16 => IdlType::Int16,
        TypeInner::Int32 => IdlType::Int32,
        TypeInner::Int64 => IdlType::Int64,
        TypeInner::Principal => IdlType::Principal,
        TypeInner::Null => IdlType::Null,
        TypeInner::Reserved => IdlType::Reserved,
        _ => return Err(IdlParseError::new(format!("unsupported type {}", ty))),
    };

    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generated_service() {
        let iface = parse_service(r#"service : { "greet": (text) -> (text) query; }"#).unwrap();

        let greet = iface.method("greet").unwrap();
        assert_eq!(greet.args, vec![IdlType::Text]);
        assert_eq!(greet.returns, vec![IdlType::Text]);
        assert_eq!(greet.mode, CallMode::Query);
    }

    #[test]
    fn test_parse_multiple_methods() {
        let source = r#"
            // voting power queries
            service : {
                _union_voting_power_of_at : (principal, int64) -> (nat64) query;
                set_nickname : (opt text) -> ();
                tags : () -> (vec text) query;
            }
        "#;
        let iface = parse_service(source).unwrap();

        let names: Vec<_> = iface.method_names().collect();
        assert_eq!(names, vec!["_union_voting_power_of_at", "set_nickname", "tags"]);

        let set = iface.method("set_nickname").unwrap();
        assert_eq!(set.mode, CallMode::Update);
        assert_eq!(set.args, vec![IdlType::Opt(Box::new(IdlType::Text))]);
        assert!(set.returns.is_empty());
    }

    #[test]
    fn test_type_aliases_resolve() {
        let source = r#"
            type name = text;
            type names = vec name;
            service : {
                greet_all : (names) -> (vec text);
            }
        "#;
        let iface = parse_service(source).unwrap();

        let greet_all = iface.method("greet_all").unwrap();
        assert_eq!(greet_all.args, vec![IdlType::Vec(Box::new(IdlType::Text))]);
        assert_eq!(greet_all.mode, CallMode::Update);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_service("actor : {}").is_err());
        assert!(parse_service("service : { greet : (text) (text); }").is_err());
        assert!(parse_service("service : { greet : (text) -> (text); } extra").is_err());
        assert!(parse_service("service : { greet : (unknown_type) -> (); }").is_err());
        assert!(parse_service("type a = text;").is_err());
    }

    #[test]
    fn test_unsupported_types_are_reported() {
        let err = parse_service("service : { save : (record { id : nat }) -> (); }").unwrap_err();
        assert!(err.message.contains("unsupported type"));

        let err = parse_service("type list = opt list; service : { f : (list) -> () }");
        assert!(err.is_err());
    }

    #[test]
    fn test_parse_empty_service() {
        let iface = parse_service("service : {}").unwrap();
        assert_eq!(iface.method_names().count(), 0);
    }
}
