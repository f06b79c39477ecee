// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use typed_vm::ecmascript::{
    abstract_operations::operations_on_objects::{
        call, call_function, construct, enumerate_object_properties, get,
        get_own_property_descriptor, set,
    },
    builtins::{ArgumentsList, ArrayBuffer, TypedArrayKind},
    execution::{Agent, JsResult, Options, agent::ExceptionType},
    types::{Object, PropertyKey, Value},
};

fn new_array_buffer(agent: &mut Agent, arguments: &[Value]) -> JsResult<Object> {
    let constructor = agent.current_realm().intrinsics().array_buffer();
    construct(agent, constructor, Some(ArgumentsList(arguments)), None)
}

fn get_named(agent: &mut Agent, o: Object, name: &str) -> Value {
    let key = PropertyKey::from_str(agent, name);
    get(agent, o, key).unwrap()
}

fn byte_length(agent: &mut Agent, o: Object) -> f64 {
    get_named(agent, o, "byteLength").as_f64().unwrap()
}

fn invoke(agent: &mut Agent, o: Object, name: &str, arguments: &[Value]) -> JsResult<Value> {
    let key = PropertyKey::from_str(agent, name);
    let method = get(agent, o, key)?;
    call(agent, method, o.into_value(), Some(ArgumentsList(arguments)))
}

fn slice(agent: &mut Agent, buffer: Object, arguments: &[Value]) -> Object {
    Object::try_from(invoke(agent, buffer, "slice", arguments).unwrap()).unwrap()
}

/// A buffer of `len` bytes holding `0, 1, 2, ...`, written through a
/// Uint8Array view.
fn counting_buffer(agent: &mut Agent, len: u32) -> Object {
    let buffer = new_array_buffer(agent, &[len.into()]).unwrap();
    let uint8 = agent
        .current_realm()
        .intrinsics()
        .typed_array_constructor(TypedArrayKind::Uint8);
    let view = construct(agent, uint8, Some(ArgumentsList(&[buffer.into_value()])), None).unwrap();
    for i in 0..len {
        set(agent, view, i.into(), Value::from(i as u8), true).unwrap();
    }
    buffer
}

fn first_byte(agent: &Agent, buffer: Object) -> u8 {
    let Object::ArrayBuffer(buffer) = buffer else {
        panic!("Expected an ArrayBuffer");
    };
    buffer.as_slice(agent)[0]
}

#[test]
fn byte_lengths_are_coerced() {
    let mut agent = Agent::new(Options::default());
    let cases = [
        (Value::from(12), 12.0),
        (Value::from(0), 0.0),
        (Value::from(-10), 0.0),
        (Value::from(2.567), 2.0),
        (Value::Undefined, 0.0),
        (Value::Null, 0.0),
        (Value::Boolean(true), 1.0),
    ];
    for (argument, expected) in cases {
        let buffer = new_array_buffer(&mut agent, &[argument]).unwrap();
        assert_eq!(byte_length(&mut agent, buffer), expected, "{argument:?}");
    }
    let abc = Value::from_str(&mut agent, "abc");
    let buffer = new_array_buffer(&mut agent, &[abc]).unwrap();
    assert_eq!(byte_length(&mut agent, buffer), 0.0);
    let thirty = Value::from_str(&mut agent, " 30 ");
    let buffer = new_array_buffer(&mut agent, &[thirty]).unwrap();
    assert_eq!(byte_length(&mut agent, buffer), 30.0);
    let buffer = new_array_buffer(&mut agent, &[]).unwrap();
    assert_eq!(byte_length(&mut agent, buffer), 0.0);
}

#[test]
fn new_buffers_are_zeroed() {
    let mut agent = Agent::new(Options::default());
    let buffer = new_array_buffer(&mut agent, &[Value::from(64)]).unwrap();
    let buffer = ArrayBuffer::try_from(buffer.into_value()).unwrap();
    assert_eq!(buffer.byte_length(&agent), 64);
    assert!(buffer.as_slice(&agent).iter().all(|byte| *byte == 0));
}

#[test]
fn allocation_above_the_configured_maximum_throws() {
    let mut agent = Agent::new(Options {
        max_array_buffer_byte_length: 1024,
        ..Default::default()
    });
    assert!(new_array_buffer(&mut agent, &[Value::from(1024)]).is_ok());
    let error = new_array_buffer(&mut agent, &[Value::from(1025)]).unwrap_err();
    assert_eq!(error.kind(&agent), Some(ExceptionType::RangeError));
    assert!(error.message(&agent).is_some());
}

#[test]
fn byte_length_is_a_read_only_accessor() {
    let mut agent = Agent::new(Options::default());
    let buffer = new_array_buffer(&mut agent, &[Value::from(12)]).unwrap();
    let key = PropertyKey::from_str(&mut agent, "byteLength");

    // Sloppy assignment is a silent no-op.
    set(&mut agent, buffer, key, Value::from(7), false).unwrap();
    assert_eq!(byte_length(&mut agent, buffer), 12.0);

    // Strict assignment throws.
    let error = set(&mut agent, buffer, key, Value::from(7), true).unwrap_err();
    assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
    assert_eq!(byte_length(&mut agent, buffer), 12.0);

    assert_eq!(get_own_property_descriptor(&mut agent, buffer, key).unwrap(), None);
    let prototype = agent.current_realm().intrinsics().array_buffer_prototype();
    let descriptor = get_own_property_descriptor(&mut agent, prototype.into_object(), key)
        .unwrap()
        .unwrap();
    assert_eq!(descriptor.enumerable, Some(false));
    assert_eq!(descriptor.configurable, Some(true));
    assert!(matches!(descriptor.get, Some(Some(_))));
    assert!(matches!(descriptor.set, Some(None) | None));
}

#[test]
fn byte_length_getter_requires_an_array_buffer() {
    let mut agent = Agent::new(Options::default());
    let prototype = agent.current_realm().intrinsics().array_buffer_prototype();
    let key = PropertyKey::from_str(&mut agent, "byteLength");
    let descriptor = get_own_property_descriptor(&mut agent, prototype.into_object(), key)
        .unwrap()
        .unwrap();
    let Some(Some(getter)) = descriptor.get else {
        panic!("byteLength should be an accessor");
    };

    let uint8 = agent
        .current_realm()
        .intrinsics()
        .typed_array_constructor(TypedArrayKind::Uint8);
    let view = construct(&mut agent, uint8, Some(ArgumentsList(&[Value::from(4)])), None)
        .unwrap();
    let plain = agent.current_realm().intrinsics().object_prototype();
    for receiver in [
        view.into_value(),
        plain.into_value(),
        Value::from(1),
        Value::Undefined,
    ] {
        let error = call_function(&mut agent, getter, receiver, None).unwrap_err();
        assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
    }
}

#[test]
fn slice_boundaries() {
    let mut agent = Agent::new(Options::default());
    let buffer = counting_buffer(&mut agent, 100);

    let piece = slice(&mut agent, buffer, &[Value::from(-11), Value::from(-10)]);
    assert_eq!(byte_length(&mut agent, piece), 1.0);
    assert_eq!(first_byte(&agent, piece), 89);

    let abc = Value::from_str(&mut agent, "abc");
    let piece = slice(&mut agent, buffer, &[Value::from(90), abc]);
    assert_eq!(byte_length(&mut agent, piece), 0.0);

    let piece = slice(&mut agent, buffer, &[Value::from(90)]);
    assert_eq!(byte_length(&mut agent, piece), 10.0);
    assert_eq!(first_byte(&agent, piece), 90);

    let piece = slice(&mut agent, buffer, &[Value::from(90), Value::Undefined]);
    assert_eq!(byte_length(&mut agent, piece), 10.0);

    let piece = slice(&mut agent, buffer, &[abc, Value::from(3)]);
    assert_eq!(byte_length(&mut agent, piece), 3.0);
    assert_eq!(first_byte(&agent, piece), 0);

    let piece = slice(&mut agent, buffer, &[Value::from(-1000), Value::from(1000)]);
    assert_eq!(byte_length(&mut agent, piece), 100.0);

    let piece = slice(&mut agent, buffer, &[Value::from(60), Value::from(40)]);
    assert_eq!(byte_length(&mut agent, piece), 0.0);

    let piece = slice(&mut agent, buffer, &[Value::from(10.9), Value::from(-80.5)]);
    assert_eq!(byte_length(&mut agent, piece), 10.0);
    assert_eq!(first_byte(&agent, piece), 10);
}

#[test]
fn slice_is_idempotent_and_copies() {
    let mut agent = Agent::new(Options::default());
    let buffer = counting_buffer(&mut agent, 16);
    let arguments = [Value::from(4), Value::from(-4)];
    let first = slice(&mut agent, buffer, &arguments);
    let second = slice(&mut agent, buffer, &arguments);
    assert_ne!(first, second);
    let (Object::ArrayBuffer(first), Object::ArrayBuffer(second)) = (first, second) else {
        panic!("slice should return ArrayBuffers");
    };
    assert_eq!(first.as_slice(&agent), second.as_slice(&agent));
    assert_eq!(first.as_slice(&agent), &[4, 5, 6, 7, 8, 9, 10, 11]);

    let uint8 = agent
        .current_realm()
        .intrinsics()
        .typed_array_constructor(TypedArrayKind::Uint8);
    let source_view =
        construct(&mut agent, uint8, Some(ArgumentsList(&[buffer.into_value()])), None).unwrap();
    set(&mut agent, source_view, PropertyKey::from(4u32), Value::from(99), true).unwrap();
    assert_eq!(first.as_slice(&agent)[0], 4);
}

#[test]
fn slice_requires_an_array_buffer_receiver() {
    let mut agent = Agent::new(Options::default());
    let prototype = agent.current_realm().intrinsics().array_buffer_prototype();
    let slice_function = get_named(&mut agent, prototype.into_object(), "slice");
    let error = call(&mut agent, slice_function, Value::from(3), None).unwrap_err();
    assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
}

#[test]
fn direct_call_constructs() {
    let mut agent = Agent::new(Options::default());
    let constructor = agent.current_realm().intrinsics().array_buffer();
    let result = call(
        &mut agent,
        constructor.into_value(),
        Value::Undefined,
        Some(ArgumentsList(&[Value::from(5)])),
    )
    .unwrap();
    let buffer = ArrayBuffer::try_from(result).unwrap();
    assert_eq!(buffer.byte_length(&agent), 5);
}

#[test]
fn is_view_recognises_typed_arrays_only() {
    let mut agent = Agent::new(Options::default());
    let constructor = agent.current_realm().intrinsics().array_buffer().into_object();
    let buffer = new_array_buffer(&mut agent, &[Value::from(8)]).unwrap();
    let int16 = agent
        .current_realm()
        .intrinsics()
        .typed_array_constructor(TypedArrayKind::Int16);
    let view = construct(&mut agent, int16, Some(ArgumentsList(&[buffer.into_value()])), None)
        .unwrap();

    let result = invoke(&mut agent, constructor, "isView", &[view.into_value()]).unwrap();
    assert_eq!(result, Value::Boolean(true));
    let result = invoke(&mut agent, constructor, "isView", &[buffer.into_value()]).unwrap();
    assert_eq!(result, Value::Boolean(false));
    let result = invoke(&mut agent, constructor, "isView", &[]).unwrap();
    assert_eq!(result, Value::Boolean(false));
}

#[test]
fn arbitrary_properties_are_ordinary_storage() {
    let mut agent = Agent::new(Options::default());
    let buffer = new_array_buffer(&mut agent, &[Value::from(4)]).unwrap();
    let foo = PropertyKey::from_str(&mut agent, "foo");
    let bar = Value::from_str(&mut agent, "bar");
    set(&mut agent, buffer, foo, bar, true).unwrap();
    set(&mut agent, buffer, PropertyKey::from(0u32), Value::from(7), true).unwrap();

    assert_eq!(get(&mut agent, buffer, foo).unwrap(), bar);
    assert_eq!(get(&mut agent, buffer, PropertyKey::from(0u32)).unwrap(), Value::from(7));
    assert_eq!(byte_length(&mut agent, buffer), 4.0);
    let Object::ArrayBuffer(raw) = buffer else {
        panic!("Expected an ArrayBuffer");
    };
    assert_eq!(raw.as_slice(&agent), &[0, 0, 0, 0]);
}

#[test]
fn family_objects_enumerate_no_builtin_properties() {
    let mut agent = Agent::new(Options::default());
    let buffer = new_array_buffer(&mut agent, &[Value::from(4)]).unwrap();
    let intrinsics = agent.current_realm().intrinsics();
    let constructor = intrinsics.array_buffer().into_object();
    let prototype = intrinsics.array_buffer_prototype().into_object();
    for object in [buffer, constructor, prototype] {
        let keys = enumerate_object_properties(&mut agent, object).unwrap();
        assert!(keys.is_empty(), "{object:?} enumerated {keys:?}");
    }

    let foo = PropertyKey::from_str(&mut agent, "foo");
    set(&mut agent, buffer, foo, Value::Null, true).unwrap();
    let keys = enumerate_object_properties(&mut agent, buffer).unwrap();
    assert_eq!(keys, vec![foo]);
}
