// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.3 Operations on Objects](https://tc39.es/ecma262/#sec-operations-on-objects)

use ahash::RandomState;
use hashbrown::HashSet;

use super::{testing_and_comparison::is_callable, type_conversion::to_length};
use crate::ecmascript::{
    builtins::{
        ArgumentsList, BuiltinFunction, array::Array, builtin_function::builtin_call_or_construct,
    },
    execution::{Agent, JsResult, agent::ExceptionType},
    types::{InternalMethods, Object, PropertyDescriptor, PropertyKey, Value},
};

/// ### [7.3.2 Get ( O, P )](https://tc39.es/ecma262/#sec-get-o-p)
///
/// The abstract operation Get takes arguments O (an Object) and P (a property
/// key) and returns either a normal completion containing an ECMAScript
/// language value or a throw completion. It is used to retrieve the value of
/// a specific property of an object.
pub fn get(agent: &mut Agent, o: impl Into<Object>, p: PropertyKey) -> JsResult<Value> {
    let o = o.into();
    // 1. Return ? O.[[Get]](P, O).
    o.internal_get(agent, p, o.into_value())
}

/// ### [7.3.4 Set ( O, P, V, Throw )](https://tc39.es/ecma262/#sec-set-o-p-v-throw)
///
/// The abstract operation Set takes arguments O (an Object), P (a property
/// key), V (an ECMAScript language value), and Throw (a Boolean) and returns
/// either a normal completion containing UNUSED or a throw completion. It is
/// used to set the value of a specific property of an object. V is the new
/// value for the property.
///
/// `throw` selects strict-mode assignment semantics.
pub fn set(
    agent: &mut Agent,
    o: impl Into<Object>,
    p: PropertyKey,
    v: Value,
    throw: bool,
) -> JsResult<()> {
    let o = o.into();
    // 1. Let success be ? O.[[Set]](P, V, O).
    let success = o.internal_set(agent, p, v, o.into_value())?;
    // 2. If success is false and Throw is true, throw a TypeError exception.
    if !success && throw {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Could not set property",
        ));
    }
    // 3. Return UNUSED.
    Ok(())
}

/// ### [7.3.5 CreateDataProperty ( O, P, V )](https://tc39.es/ecma262/#sec-createdataproperty)
///
/// > NOTE: This abstract operation creates a property whose attributes are
/// > set to the same defaults used for properties created by the ECMAScript
/// > language assignment operator. Normally, the property will not already
/// > exist. If it does exist and is not configurable or if O is not
/// > extensible, \[\[DefineOwnProperty]] will return false.
pub fn create_data_property(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
) -> JsResult<bool> {
    // 1. Let newDesc be the PropertyDescriptor { [[Value]]: V, [[Writable]]: true, [[Enumerable]]: true, [[Configurable]]: true }.
    let new_descriptor = PropertyDescriptor {
        value: Some(value),
        writable: Some(true),
        get: None,
        set: None,
        enumerable: Some(true),
        configurable: Some(true),
    };
    // 2. Return ? O.[[DefineOwnProperty]](P, newDesc).
    object.internal_define_own_property(agent, property_key, new_descriptor)
}

/// ### [7.3.7 CreateDataPropertyOrThrow ( O, P, V )](https://tc39.es/ecma262/#sec-createdatapropertyorthrow)
pub fn create_data_property_or_throw(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
) -> JsResult<()> {
    // 1. Let success be ? CreateDataProperty(O, P, V).
    let success = create_data_property(agent, object, property_key, value)?;
    // 2. If success is false, throw a TypeError exception.
    if !success {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Could not create property",
        ));
    }
    // 3. Return UNUSED.
    Ok(())
}

/// ### [7.3.8 DefinePropertyOrThrow ( O, P, desc )](https://tc39.es/ecma262/#sec-definepropertyorthrow)
pub fn define_property_or_throw(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    desc: PropertyDescriptor,
) -> JsResult<()> {
    // 1. Let success be ? O.[[DefineOwnProperty]](P, desc).
    let success = object.internal_define_own_property(agent, property_key, desc)?;
    // 2. If success is false, throw a TypeError exception.
    if !success {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot redefine property",
        ));
    }
    // 3. Return UNUSED.
    Ok(())
}

/// ### [7.3.9 DeletePropertyOrThrow ( O, P )](https://tc39.es/ecma262/#sec-deletepropertyorthrow)
pub fn delete_property_or_throw(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
) -> JsResult<()> {
    // 1. Let success be ? O.[[Delete]](P).
    let success = object.internal_delete(agent, property_key)?;
    // 2. If success is false, throw a TypeError exception.
    if !success {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot delete property",
        ));
    }
    // 3. Return UNUSED.
    Ok(())
}

/// ### [7.3.12 HasProperty ( O, P )](https://tc39.es/ecma262/#sec-hasproperty)
///
/// The abstract operation HasProperty takes arguments O (an Object) and P (a
/// property key) and returns either a normal completion containing a Boolean
/// or a throw completion. It is used to determine whether an object has a
/// property with the specified property key. The property may be either own
/// or inherited.
pub fn has_property(agent: &mut Agent, o: Object, p: PropertyKey) -> JsResult<bool> {
    // 1. Return ? O.[[HasProperty]](P).
    o.internal_has_property(agent, p)
}

/// ### [7.3.13 HasOwnProperty ( O, P )](https://tc39.es/ecma262/#sec-hasownproperty)
pub fn has_own_property(agent: &mut Agent, o: Object, p: PropertyKey) -> JsResult<bool> {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    let desc = o.internal_get_own_property(agent, p)?;
    // 2. If desc is undefined, return false.
    // 3. Return true.
    Ok(desc.is_some())
}

/// The own property descriptor of `o` at `p`, as
/// `Object.getOwnPropertyDescriptor` sees it.
pub fn get_own_property_descriptor(
    agent: &mut Agent,
    o: Object,
    p: PropertyKey,
) -> JsResult<Option<PropertyDescriptor>> {
    o.internal_get_own_property(agent, p)
}

/// ### [7.3.14 Call ( F, V \[ , argumentsList \] )](https://tc39.es/ecma262/#sec-call)
///
/// The abstract operation Call takes arguments F (an ECMAScript language
/// value) and V (an ECMAScript language value) and optional argument
/// argumentsList (a List of ECMAScript language values) and returns either a
/// normal completion containing an ECMAScript language value or a throw
/// completion. It is used to call the \[\[Call]] internal method of a function
/// object. F is the function object, V is an ECMAScript language value that
/// is the value of \[\[ThisValue]], and argumentsList is the value passed to
/// the corresponding argument of the internal method. If argumentsList is not
/// present, a new empty List is used as its value.
pub fn call(
    agent: &mut Agent,
    f: Value,
    v: Value,
    arguments_list: Option<ArgumentsList>,
) -> JsResult<Value> {
    // 1. If argumentsList is not present, set argumentsList to a new empty List.
    // 2. If IsCallable(F) is false, throw a TypeError exception.
    let Some(f) = is_callable(f) else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Not a callable object",
        ));
    };
    // 3. Return ? F.[[Call]](V, argumentsList).
    call_function(agent, f, v, arguments_list)
}

/// [`call`] on a value already known to be callable.
pub fn call_function(
    agent: &mut Agent,
    f: BuiltinFunction,
    v: Value,
    arguments_list: Option<ArgumentsList>,
) -> JsResult<Value> {
    builtin_call_or_construct(agent, f, Some(v), arguments_list, None)
}

/// ### [7.3.15 Construct ( F \[ , argumentsList \[ , newTarget \] \] )](https://tc39.es/ecma262/#sec-construct)
///
/// The abstract operation Construct takes argument F (a constructor) and
/// optional arguments argumentsList (a List of ECMAScript language values)
/// and newTarget (a constructor) and returns either a normal completion
/// containing an Object or a throw completion. It is used to call the
/// \[\[Construct]] internal method of a function object.
pub fn construct(
    agent: &mut Agent,
    f: BuiltinFunction,
    arguments_list: Option<ArgumentsList>,
    new_target: Option<Object>,
) -> JsResult<Object> {
    // 1. If newTarget is not present, set newTarget to F.
    let new_target = new_target.unwrap_or_else(|| f.into_object());
    // 2. If argumentsList is not present, set argumentsList to a new empty List.
    // 3. Return ? F.[[Construct]](argumentsList, newTarget).
    let result = builtin_call_or_construct(agent, f, None, arguments_list, Some(new_target))?;
    Object::try_from(result).map_err(|_| {
        agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Constructor did not return an object",
        )
    })
}

/// ### [7.3.18 CreateArrayFromList ( elements )](https://tc39.es/ecma262/#sec-createarrayfromlist)
///
/// The abstract operation CreateArrayFromList takes argument elements (a List
/// of ECMAScript language values) and returns an Array. It is used to create
/// an Array whose elements are provided by elements.
pub fn create_array_from_list(agent: &mut Agent, elements: &[Value]) -> Array {
    Array::from_slice(agent, elements)
}

/// ### [7.3.19 LengthOfArrayLike ( obj )](https://tc39.es/ecma262/#sec-lengthofarraylike)
///
/// The abstract operation LengthOfArrayLike takes argument obj (an Object)
/// and returns either a normal completion containing a non-negative integer
/// or a throw completion. It returns the value of the "length" property of an
/// array-like object.
pub fn length_of_array_like(agent: &mut Agent, obj: Object) -> JsResult<u64> {
    // Fast path for Array objects and typed arrays.
    if let Object::Array(array) = obj {
        return Ok(array.len(agent) as u64);
    }
    if let Some(typed_array) = obj.as_typed_array() {
        return Ok(typed_array.array_length(agent) as u64);
    }

    // 1. Return ℝ(? ToLength(? Get(obj, "length"))).
    let length_key = PropertyKey::from_str(agent, "length");
    let property = get(agent, obj, length_key)?;
    to_length(agent, property)
}

/// ### [14.7.5.9 EnumerateObjectProperties ( O )](https://tc39.es/ecma262/#sec-enumerate-object-properties)
///
/// The keys a `for-in` loop over `o` visits: own and inherited enumerable
/// properties, where a key is only reported for the nearest object of the
/// prototype chain that has it.
pub fn enumerate_object_properties(agent: &mut Agent, o: Object) -> JsResult<Vec<PropertyKey>> {
    let mut visited = HashSet::with_hasher(RandomState::new());
    let mut keys = vec![];
    let mut current = Some(o);
    while let Some(object) = current {
        for key in object.internal_own_property_keys(agent)? {
            if !visited.insert(key) {
                continue;
            }
            let Some(descriptor) = object.internal_get_own_property(agent, key)? else {
                continue;
            };
            if descriptor.enumerable == Some(true) {
                keys.push(key);
            }
        }
        current = object.internal_get_prototype_of(agent)?;
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecmascript::{
        builtins::ordinary::ordinary_object_create_with_intrinsics,
        execution::{Options, ProtoIntrinsics},
    };

    #[test]
    fn call_rejects_non_callables() {
        let mut agent = Agent::new(Options::default());
        let error = call(&mut agent, Value::from(1), Value::Undefined, None).unwrap_err();
        assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
        assert_eq!(error.message(&agent), Some("Not a callable object"));
    }

    #[test]
    fn length_of_array_like_objects() {
        let mut agent = Agent::new(Options::default());
        let array = create_array_from_list(&mut agent, &[Value::Null, Value::Undefined]);
        assert_eq!(length_of_array_like(&mut agent, array.into_object()), Ok(2));

        let object: Object =
            ordinary_object_create_with_intrinsics(&mut agent, Some(ProtoIntrinsics::Object))
                .into();
        assert_eq!(length_of_array_like(&mut agent, object), Ok(0));
        let length_key = PropertyKey::from_str(&mut agent, "length");
        let length = Value::from_str(&mut agent, "3.9");
        set(&mut agent, object, length_key, length, true).unwrap();
        assert_eq!(length_of_array_like(&mut agent, object), Ok(3));
    }

    #[test]
    fn enumeration_skips_shadowed_and_non_enumerable_keys() {
        let mut agent = Agent::new(Options::default());
        let parent: Object =
            ordinary_object_create_with_intrinsics(&mut agent, Some(ProtoIntrinsics::Object))
                .into();
        let child: Object = agent.heap.create_object_with_prototype(Some(parent)).into();
        let a = PropertyKey::from_str(&mut agent, "a");
        let b = PropertyKey::from_str(&mut agent, "b");
        let c = PropertyKey::from_str(&mut agent, "c");
        create_data_property_or_throw(&mut agent, parent, a, Value::from(1)).unwrap();
        create_data_property_or_throw(&mut agent, parent, b, Value::from(2)).unwrap();
        define_property_or_throw(
            &mut agent,
            child,
            a,
            PropertyDescriptor {
                value: Some(Value::from(3)),
                enumerable: Some(false),
                ..Default::default()
            },
        )
        .unwrap();
        create_data_property_or_throw(&mut agent, child, c, Value::from(4)).unwrap();
        create_data_property_or_throw(&mut agent, child, PropertyKey::from(0u32), Value::Null)
            .unwrap();

        // "a" is shadowed by a non-enumerable own property of the child.
        assert_eq!(
            enumerate_object_properties(&mut agent, child),
            Ok(vec![PropertyKey::from(0u32), c, b])
        );
        assert!(has_property(&mut agent, child, b).unwrap());
        assert!(!has_own_property(&mut agent, child, b).unwrap());
        delete_property_or_throw(&mut agent, child, c).unwrap();
        assert!(!has_own_property(&mut agent, child, c).unwrap());
        let a_descriptor = get_own_property_descriptor(&mut agent, child, a).unwrap();
        assert_eq!(a_descriptor.and_then(|d| d.enumerable), Some(false));
        let error = delete_property_or_throw(&mut agent, child, a).unwrap_err();
        assert_eq!(error.kind(&agent), Some(ExceptionType::TypeError));
    }
}
