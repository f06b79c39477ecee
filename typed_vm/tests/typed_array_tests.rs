// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use typed_vm::ecmascript::{
    abstract_operations::operations_on_objects::{
        call, call_function, construct, create_array_from_list, enumerate_object_properties, get,
        get_own_property_descriptor, set,
    },
    builtins::{ArgumentsList, TypedArray, TypedArrayKind},
    execution::{Agent, JsResult, Options, agent::ExceptionType},
    types::{Object, PropertyKey, Value},
};

fn new_view(agent: &mut Agent, kind: TypedArrayKind, arguments: &[Value]) -> JsResult<Object> {
    let constructor = agent.current_realm().intrinsics().typed_array_constructor(kind);
    construct(agent, constructor, Some(ArgumentsList(arguments)), None)
}

fn new_buffer(agent: &mut Agent, byte_length: u32) -> Object {
    let constructor = agent.current_realm().intrinsics().array_buffer();
    construct(agent, constructor, Some(ArgumentsList(&[byte_length.into()])), None).unwrap()
}

fn get_named(agent: &mut Agent, o: Object, name: &str) -> Value {
    let key = PropertyKey::from_str(agent, name);
    get(agent, o, key).unwrap()
}

fn get_number(agent: &mut Agent, o: Object, name: &str) -> f64 {
    get_named(agent, o, name).as_f64().unwrap()
}

fn get_index(agent: &mut Agent, o: Object, index: u32) -> Value {
    get(agent, o, index.into()).unwrap()
}

fn set_index(agent: &mut Agent, o: Object, index: u32, value: Value) {
    set(agent, o, index.into(), value, true).unwrap();
}

fn invoke(agent: &mut Agent, o: Object, name: &str, arguments: &[Value]) -> JsResult<Value> {
    let key = PropertyKey::from_str(agent, name);
    let method = get(agent, o, key)?;
    call(agent, method, o.into_value(), Some(ArgumentsList(arguments)))
}

fn subarray(agent: &mut Agent, view: Object, arguments: &[Value]) -> Object {
    Object::try_from(invoke(agent, view, "subarray", arguments).unwrap()).unwrap()
}

fn expect_error(agent: &Agent, result: JsResult<Object>, kind: ExceptionType) {
    match result {
        Ok(object) => panic!("Expected {kind:?}, got {object:?}"),
        Err(error) => assert_eq!(error.kind(agent), Some(kind)),
    }
}

#[test]
fn construct_from_length() {
    let mut agent = Agent::new(Options::default());
    for kind in TypedArrayKind::ALL {
        let size = kind.element_size() as f64;
        let view = new_view(&mut agent, kind, &[Value::from(10)]).unwrap();
        assert_eq!(get_number(&mut agent, view, "length"), 10.0, "{kind:?}");
        assert_eq!(get_number(&mut agent, view, "byteLength"), 10.0 * size);
        assert_eq!(get_number(&mut agent, view, "byteOffset"), 0.0);
        let buffer = Object::try_from(get_named(&mut agent, view, "buffer")).unwrap();
        assert_eq!(get_number(&mut agent, buffer, "byteLength"), 10.0 * size);
        assert_eq!(get_index(&mut agent, view, 9), Value::from(0));

        let thirty = Value::from_str(&mut agent, "30");
        let view = new_view(&mut agent, kind, &[thirty]).unwrap();
        assert_eq!(get_number(&mut agent, view, "length"), 30.0);

        let view = new_view(&mut agent, kind, &[Value::from(-10)]).unwrap();
        assert_eq!(get_number(&mut agent, view, "length"), 0.0);
    }
}

#[test]
fn construct_over_a_buffer() {
    let mut agent = Agent::new(Options::default());
    for kind in TypedArrayKind::ALL {
        let size = kind.element_size() as u32;
        let buffer = new_buffer(&mut agent, 256 * size);

        let view = new_view(
            &mut agent,
            kind,
            &[buffer.into_value(), Value::from(2 * size), Value::from(10)],
        )
        .unwrap();
        assert_eq!(get_number(&mut agent, view, "byteLength"), f64::from(10 * size));
        assert_eq!(get_number(&mut agent, view, "byteOffset"), f64::from(2 * size));
        assert_eq!(get_number(&mut agent, view, "length"), 10.0);
        assert_eq!(get_named(&mut agent, view, "buffer"), buffer.into_value());

        let view =
            new_view(&mut agent, kind, &[buffer.into_value(), Value::from(2 * size)]).unwrap();
        assert_eq!(get_number(&mut agent, view, "length"), 254.0);

        let view = new_view(&mut agent, kind, &[buffer.into_value()]).unwrap();
        assert_eq!(get_number(&mut agent, view, "length"), 256.0);

        // An offset at the very end gives an empty view.
        let view =
            new_view(&mut agent, kind, &[buffer.into_value(), Value::from(256 * size)]).unwrap();
        assert_eq!(get_number(&mut agent, view, "length"), 0.0);
        assert_eq!(get_number(&mut agent, view, "byteOffset"), f64::from(256 * size));
        let view = new_view(
            &mut agent,
            kind,
            &[buffer.into_value(), Value::from(256 * size), Value::from(0)],
        )
        .unwrap();
        assert_eq!(get_number(&mut agent, view, "byteLength"), 0.0);
    }
}

#[test]
fn invalid_buffer_ranges_throw_range_errors() {
    let mut agent = Agent::new(Options::default());
    for kind in TypedArrayKind::ALL {
        let size = kind.element_size() as u32;
        let buffer = new_buffer(&mut agent, 256 * size).into_value();

        let result = new_view(&mut agent, kind, &[buffer, Value::from(-1)]);
        expect_error(&agent, result, ExceptionType::RangeError);
        let result = new_view(&mut agent, kind, &[buffer, Value::from(0), Value::from(-1)]);
        expect_error(&agent, result, ExceptionType::RangeError);
        let result = new_view(&mut agent, kind, &[buffer, Value::from(257 * size)]);
        expect_error(&agent, result, ExceptionType::RangeError);
        let result = new_view(
            &mut agent,
            kind,
            &[buffer, Value::from(128 * size), Value::from(129)],
        );
        expect_error(&agent, result, ExceptionType::RangeError);
        let result = new_view(&mut agent, kind, &[buffer, Value::from(0), Value::from(257)]);
        expect_error(&agent, result, ExceptionType::RangeError);

        if size > 1 {
            let result = new_view(&mut agent, kind, &[buffer, Value::from(1)]);
            expect_error(&agent, result, ExceptionType::RangeError);

            let odd = new_buffer(&mut agent, 256 * size + 1).into_value();
            let result = new_view(&mut agent, kind, &[odd]);
            expect_error(&agent, result, ExceptionType::RangeError);
            // An explicit length makes the unaligned tail irrelevant.
            let view = new_view(&mut agent, kind, &[odd, Value::from(0), Value::from(256)])
                .unwrap();
            assert_eq!(get_number(&mut agent, view, "length"), 256.0);
        }
    }
}

#[test]
fn construct_without_arguments() {
    let mut agent = Agent::new(Options::default());
    for kind in TypedArrayKind::ALL {
        let result = new_view(&mut agent, kind, &[]);
        if kind.element_size() == 1 {
            let view = result.unwrap();
            assert_eq!(get_number(&mut agent, view, "length"), 0.0);
        } else {
            expect_error(&agent, result, ExceptionType::TypeError);
        }
        // An explicit undefined is a zero length, not a missing argument.
        let view = new_view(&mut agent, kind, &[Value::Undefined]).unwrap();
        assert_eq!(get_number(&mut agent, view, "length"), 0.0);
    }
}

#[test]
fn construct_from_array_like_sources() {
    let mut agent = Agent::new(Options::default());
    let three = Value::from_str(&mut agent, "3");
    let abc = Value::from_str(&mut agent, "abc");
    let source = create_array_from_list(
        &mut agent,
        &[Value::from(1), Value::from(2.5), three, Value::Undefined, abc],
    );
    let view = new_view(&mut agent, TypedArrayKind::Int16, &[source.into()]).unwrap();
    assert_eq!(get_number(&mut agent, view, "length"), 5.0);
    let expected = [1, 2, 3, 0, 0];
    for (index, expected) in expected.into_iter().enumerate() {
        assert_eq!(get_index(&mut agent, view, index as u32), Value::from(expected));
    }

    let floats = new_view(&mut agent, TypedArrayKind::Float64, &[source.into()]).unwrap();
    assert_eq!(get_index(&mut agent, floats, 1), Value::from(2.5));
    assert!(get_index(&mut agent, floats, 3).is_nan());

    // Functions are array-like through their `length`.
    let array_prototype = agent.current_realm().intrinsics().array_prototype();
    let join = get_named(&mut agent, array_prototype.into_object(), "join");
    let view = new_view(&mut agent, TypedArrayKind::Uint8, &[join]).unwrap();
    assert_eq!(get_number(&mut agent, view, "length"), 1.0);
    assert_eq!(get_index(&mut agent, view, 0), Value::from(0));
}

#[test]
fn construct_from_a_typed_array_copies() {
    let mut agent = Agent::new(Options::default());
    let source = new_view(&mut agent, TypedArrayKind::Float64, &[Value::from(3)]).unwrap();
    set_index(&mut agent, source, 0, Value::from(-1.5));
    set_index(&mut agent, source, 1, Value::from(300));
    set_index(&mut agent, source, 2, Value::from(7));

    let copy = new_view(&mut agent, TypedArrayKind::Uint8, &[source.into_value()]).unwrap();
    assert_eq!(get_number(&mut agent, copy, "length"), 3.0);
    assert_eq!(get_index(&mut agent, copy, 0), Value::from(255));
    assert_eq!(get_index(&mut agent, copy, 1), Value::from(44));
    assert_eq!(get_index(&mut agent, copy, 2), Value::from(7));

    set_index(&mut agent, source, 2, Value::from(8));
    assert_eq!(get_index(&mut agent, copy, 2), Value::from(7));
    let source_buffer = get_named(&mut agent, source, "buffer");
    let copy_buffer = get_named(&mut agent, copy, "buffer");
    assert_ne!(source_buffer, copy_buffer);
}

fn round_trip(agent: &mut Agent, kind: TypedArrayKind, input: Value) -> Value {
    let view = new_view(agent, kind, &[Value::from(1)]).unwrap();
    set_index(agent, view, 0, input);
    get_index(agent, view, 0)
}

#[test]
fn element_conversions() {
    let mut agent = Agent::new(Options::default());
    let cases: [(TypedArrayKind, f64, f64); 20] = [
        (TypedArrayKind::Uint8, 0x1FA as f64, 0xFA as f64),
        (TypedArrayKind::Uint8, -1.0, 0xFF as f64),
        (TypedArrayKind::Int8, 0x1FA as f64, -6.0),
        (TypedArrayKind::Int8, 128.0, -128.0),
        (TypedArrayKind::Uint8Clamped, 0x1FA as f64, 0xFF as f64),
        (TypedArrayKind::Uint8Clamped, -1.0, 0.0),
        (TypedArrayKind::Uint8Clamped, 2.5, 2.0),
        (TypedArrayKind::Uint8Clamped, 3.5, 4.0),
        (TypedArrayKind::Uint8Clamped, 1.6, 2.0),
        (TypedArrayKind::Uint16, 0x1FFFA as f64, 0xFFFA as f64),
        (TypedArrayKind::Uint16, -1.0, 0xFFFF as f64),
        (TypedArrayKind::Int16, 0x1FFFA as f64, -6.0),
        (TypedArrayKind::Uint32, 0x1_FFFF_FFFA_u64 as f64, 0xFFFF_FFFA_u32 as f64),
        (TypedArrayKind::Uint32, -1.0, 0xFFFF_FFFF_u32 as f64),
        (TypedArrayKind::Int32, 0x1_FFFF_FFFA_u64 as f64, -6.0),
        (TypedArrayKind::Int32, -2.9, -2.0),
        (TypedArrayKind::Int32, f64::INFINITY, 0.0),
        (TypedArrayKind::Float32, 0.1, 0.1f32 as f64),
        (TypedArrayKind::Float32, 1e40, f64::INFINITY),
        (TypedArrayKind::Float64, 0.1, 0.1),
    ];
    for (kind, input, expected) in cases {
        let result = round_trip(&mut agent, kind, Value::from(input));
        assert_eq!(result, Value::from(expected), "{kind:?} <- {input}");
    }

    for kind in TypedArrayKind::ALL {
        let result = round_trip(&mut agent, kind, Value::nan());
        if matches!(kind, TypedArrayKind::Float32 | TypedArrayKind::Float64) {
            assert!(result.is_nan());
        } else {
            assert_eq!(result, Value::from(0), "{kind:?} <- NaN");
        }
    }

    let hex = Value::from_str(&mut agent, "0x1FA");
    assert_eq!(round_trip(&mut agent, TypedArrayKind::Int8, hex), Value::from(-6));
    let abc = Value::from_str(&mut agent, "abc");
    assert_eq!(round_trip(&mut agent, TypedArrayKind::Int32, abc), Value::from(0));
    assert!(round_trip(&mut agent, TypedArrayKind::Float64, abc).is_nan());
    assert_eq!(
        round_trip(&mut agent, TypedArrayKind::Uint16, Value::Boolean(true)),
        Value::from(1)
    );
}

#[test]
fn out_of_range_access_is_ignored() {
    let mut agent = Agent::new(Options::default());
    let view = new_view(&mut agent, TypedArrayKind::Int32, &[Value::from(10)]).unwrap();
    set_index(&mut agent, view, 10, Value::from(5));
    assert_eq!(get_index(&mut agent, view, 10), Value::Undefined);
    assert_eq!(get_number(&mut agent, view, "length"), 10.0);

    for key in ["-1", "1.5", "-0", "Infinity", "NaN"] {
        let key = PropertyKey::from_str(&mut agent, key);
        set(&mut agent, view, key, Value::from(5), true).unwrap();
        assert_eq!(get(&mut agent, view, key).unwrap(), Value::Undefined);
        assert_eq!(get_own_property_descriptor(&mut agent, view, key).unwrap(), None);
    }
    let keys = enumerate_object_properties(&mut agent, view).unwrap();
    assert_eq!(keys.len(), 10);
}

#[test]
fn subarray_aliases_the_source() {
    let mut agent = Agent::new(Options::default());
    let view = new_view(&mut agent, TypedArrayKind::Int32, &[Value::from(10)]).unwrap();
    for i in 0..10u32 {
        set_index(&mut agent, view, i, Value::from(i));
    }

    let sub = subarray(&mut agent, view, &[Value::from(2), Value::from(5)]);
    assert!(sub.into_value().is_typed_array());
    assert_eq!(get_number(&mut agent, sub, "length"), 3.0);
    assert_eq!(get_number(&mut agent, sub, "byteOffset"), 8.0);
    assert_eq!(get_index(&mut agent, sub, 0), Value::from(2));
    let sub_buffer = get_named(&mut agent, sub, "buffer");
    let view_buffer = get_named(&mut agent, view, "buffer");
    assert_eq!(sub_buffer, view_buffer);

    set_index(&mut agent, sub, 0, Value::from(-7));
    assert_eq!(get_index(&mut agent, view, 2), Value::from(-7));
    set_index(&mut agent, view, 4, Value::from(44));
    assert_eq!(get_index(&mut agent, sub, 2), Value::from(44));

    // Writes past the subarray's end do not reach the source.
    set_index(&mut agent, sub, 3, Value::from(99));
    assert_eq!(get_index(&mut agent, view, 5), Value::from(5));

    let nested = subarray(&mut agent, sub, &[Value::from(1)]);
    assert_eq!(get_number(&mut agent, nested, "byteOffset"), 12.0);
    assert_eq!(get_number(&mut agent, nested, "length"), 2.0);
}

#[test]
fn subarray_resolves_relative_indices() {
    let mut agent = Agent::new(Options::default());
    let view = new_view(&mut agent, TypedArrayKind::Uint16, &[Value::from(100)]).unwrap();
    let abc = Value::from_str(&mut agent, "abc");
    let cases: [(&[Value], f64, f64); 6] = [
        (&[Value::from(-11), Value::from(-10)], 1.0, 89.0),
        (&[Value::from(90), abc], 0.0, 90.0),
        (&[Value::from(90)], 10.0, 90.0),
        (&[], 100.0, 0.0),
        (&[Value::from(60), Value::from(40)], 0.0, 60.0),
        (&[Value::from(-1000), Value::from(1000)], 100.0, 0.0),
    ];
    for (arguments, length, begin) in cases {
        let sub = subarray(&mut agent, view, arguments);
        assert_eq!(get_number(&mut agent, sub, "length"), length, "{arguments:?}");
        assert_eq!(get_number(&mut agent, sub, "byteOffset"), begin * 2.0);
        // Same arguments, same window.
        let again = subarray(&mut agent, view, arguments);
        assert_eq!(get_number(&mut agent, again, "length"), length);
        assert_eq!(get_number(&mut agent, again, "byteOffset"), begin * 2.0);
    }
}

#[test]
fn subarray_keeps_the_concrete_kind() {
    let mut agent = Agent::new(Options::default());
    for kind in TypedArrayKind::ALL {
        let view = new_view(&mut agent, kind, &[Value::from(4)]).unwrap();
        let sub = subarray(&mut agent, view, &[Value::from(1), Value::from(3)]);
        let sub = TypedArray::try_from(sub.into_value()).unwrap();
        assert_eq!(sub.kind(), kind);
        assert_eq!(sub.byte_offset(&agent), kind.element_size());
        let constructor = get_named(&mut agent, sub.into_object(), "constructor");
        let expected = agent.current_realm().intrinsics().typed_array_constructor(kind);
        assert_eq!(constructor, expected.into_value());
    }
}

#[test]
fn accessors_check_their_receiver() {
    let mut agent = Agent::new(Options::default());
    let buffer = new_buffer(&mut agent, 8);
    let plain = agent.current_realm().intrinsics().object_prototype().into_value();
    for name in ["buffer", "byteLength", "byteOffset", "length"] {
        let key = PropertyKey::from_str(&mut agent, name);
        let prototype = agent.current_realm().intrinsics().typed_array_prototype();
        let descriptor = get_own_property_descriptor(&mut agent, prototype.into_object(), key)
            .unwrap()
            .unwrap();
        assert_eq!(descriptor.enumerable, Some(false), "{name}");
        let Some(Some(getter)) = descriptor.get else {
            panic!("{name} should be an accessor");
        };
        for receiver in [buffer.into_value(), plain, Value::from(3), Value::Undefined] {
            let error = call_function(&mut agent, getter, receiver, None).unwrap_err();
            assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError), "{name}");
        }
        // Every kind inherits the same accessor.
        for kind in TypedArrayKind::ALL {
            let view = new_view(&mut agent, kind, &[Value::from(2)]).unwrap();
            assert_eq!(get_own_property_descriptor(&mut agent, view, key).unwrap(), None);
            let result = call_function(&mut agent, getter, view.into_value(), None).unwrap();
            assert_eq!(get(&mut agent, view, key).unwrap(), result);
        }
    }
}

#[test]
fn accessors_are_read_only() {
    let mut agent = Agent::new(Options::default());
    let view = new_view(&mut agent, TypedArrayKind::Uint32, &[Value::from(4)]).unwrap();
    for name in ["buffer", "byteLength", "byteOffset", "length"] {
        let key = PropertyKey::from_str(&mut agent, name);
        let before = get(&mut agent, view, key).unwrap();
        set(&mut agent, view, key, Value::from(1), false).unwrap();
        assert_eq!(get(&mut agent, view, key).unwrap(), before);
        let error = set(&mut agent, view, key, Value::from(1), true).unwrap_err();
        assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError), "{name}");
    }
}

#[test]
fn bytes_per_element_is_constant() {
    let mut agent = Agent::new(Options::default());
    for kind in TypedArrayKind::ALL {
        let intrinsics = agent.current_realm().intrinsics();
        let constructor = intrinsics.typed_array_constructor(kind).into_object();
        let prototype = intrinsics.typed_array_kind_prototype(kind).into_object();
        let key = PropertyKey::from_str(&mut agent, "BYTES_PER_ELEMENT");
        for object in [constructor, prototype] {
            let descriptor = get_own_property_descriptor(&mut agent, object, key)
                .unwrap()
                .unwrap();
            assert_eq!(descriptor.value, Some(Value::from(kind.element_size() as u32)));
            assert_eq!(descriptor.writable, Some(false));
            assert_eq!(descriptor.enumerable, Some(false));
            assert_eq!(descriptor.configurable, Some(false));
        }
        let view = new_view(&mut agent, kind, &[Value::from(1)]).unwrap();
        assert_eq!(
            get(&mut agent, view, key).unwrap(),
            Value::from(kind.element_size() as u32)
        );
    }
}

#[test]
fn enumeration_yields_only_indices_and_own_properties() {
    let mut agent = Agent::new(Options::default());
    for kind in TypedArrayKind::ALL {
        let view = new_view(&mut agent, kind, &[Value::from(3)]).unwrap();
        let keys = enumerate_object_properties(&mut agent, view).unwrap();
        let keys: Vec<String> = keys.iter().map(|key| key.as_display(&agent)).collect();
        assert_eq!(keys, ["0", "1", "2"], "{kind:?}");

        let intrinsics = agent.current_realm().intrinsics();
        let objects = [
            intrinsics.typed_array_constructor(kind).into_object(),
            intrinsics.typed_array_kind_prototype(kind).into_object(),
            intrinsics.typed_array().into_object(),
            intrinsics.typed_array_prototype().into_object(),
        ];
        for object in objects {
            let keys = enumerate_object_properties(&mut agent, object).unwrap();
            assert!(keys.is_empty(), "{object:?} enumerated {keys:?}");
        }
    }
}

#[test]
fn arbitrary_properties_are_independent_of_elements() {
    let mut agent = Agent::new(Options::default());
    let view = new_view(&mut agent, TypedArrayKind::Float32, &[Value::from(2)]).unwrap();
    let foo = PropertyKey::from_str(&mut agent, "foo");
    let bar = Value::from_str(&mut agent, "bar");
    set(&mut agent, view, foo, bar, true).unwrap();
    assert_eq!(get(&mut agent, view, foo).unwrap(), bar);
    assert_eq!(get_index(&mut agent, view, 0), Value::from(0));
    assert_eq!(get_number(&mut agent, view, "length"), 2.0);

    let keys = enumerate_object_properties(&mut agent, view).unwrap();
    let keys: Vec<String> = keys.iter().map(|key| key.as_display(&agent)).collect();
    assert_eq!(keys, ["0", "1", "foo"]);

    let joined = invoke(&mut agent, view, "toString", &[]).unwrap();
    assert_eq!(joined, Value::from_str(&mut agent, "0,0"));
}

#[test]
fn direct_calls_construct() {
    let mut agent = Agent::new(Options::default());
    for kind in TypedArrayKind::ALL {
        let constructor = agent.current_realm().intrinsics().typed_array_constructor(kind);
        let result = call(
            &mut agent,
            constructor.into_value(),
            Value::Undefined,
            Some(ArgumentsList(&[Value::from(4)])),
        )
        .unwrap();
        assert!(result.is_typed_array());
        let view = TypedArray::try_from(result).unwrap();
        assert_eq!(view.kind(), kind);
        assert_eq!(view.array_length(&agent), 4);
    }

    let typed_array = agent.current_realm().intrinsics().typed_array();
    let error = call(&mut agent, typed_array.into_value(), Value::Undefined, None).unwrap_err();
    assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
}
